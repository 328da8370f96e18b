//! Error types for synthesis and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all quilting operations
#[derive(Debug)]
pub enum QuiltError {
    /// A block or region extends past the grid it views
    OutOfBounds {
        /// Requested origin as (x, y)
        origin: (usize, usize),
        /// Requested extent as (width, height)
        extent: (usize, usize),
        /// Dimensions of the viewed grid as (width, height)
        bounds: (usize, usize),
    },

    /// Two regions that must line up have different shapes
    ShapeMismatch {
        /// Shape of the left-hand region as (width, height, channels)
        expected: (usize, usize, usize),
        /// Shape of the right-hand region as (width, height, channels)
        found: (usize, usize, usize),
    },

    /// Seam search was asked to cut through a surface with no cells
    EmptySurface {
        /// Rows in the degenerate surface
        rows: usize,
        /// Columns in the degenerate surface
        cols: usize,
    },

    /// The source cannot supply a single block of the requested size
    NoValidCandidates {
        /// Requested block side length
        block_size: usize,
        /// Source dimensions as (width, height)
        source_dimensions: (usize, usize),
    },

    /// Synthesis parameter validation failed
    InvalidParameters {
        /// Parameter name as used on the command line
        parameter: &'static str,
        /// Rejected value, formatted
        value: String,
        /// Constraint the value violates
        reason: String,
    },

    /// A source image could not be opened or decoded
    ImageLoad {
        /// Source image path
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// Failed to save a synthesized image to disk
    ImageExport {
        /// Destination path
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Reading a directory or creating a file or directory failed
    FileSystem {
        /// Path being accessed
        path: PathBuf,
        /// What was attempted, e.g. "create directory"
        operation: &'static str,
        /// I/O error reported by the OS
        source: std::io::Error,
    },
}

impl fmt::Display for QuiltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                origin,
                extent,
                bounds,
            } => {
                write!(
                    f,
                    "Region {}x{} at ({}, {}) exceeds grid bounds {}x{}",
                    extent.0, extent.1, origin.0, origin.1, bounds.0, bounds.1
                )
            }
            Self::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Region shape mismatch: expected {}x{}x{}, found {}x{}x{}",
                    expected.0, expected.1, expected.2, found.0, found.1, found.2
                )
            }
            Self::EmptySurface { rows, cols } => {
                write!(
                    f,
                    "Cannot find a seam through an empty {rows}x{cols} surface"
                )
            }
            Self::NoValidCandidates {
                block_size,
                source_dimensions,
            } => {
                write!(
                    f,
                    "No candidate blocks of size {block_size} fit in a {}x{} source",
                    source_dimensions.0, source_dimensions.1
                )
            }
            Self::InvalidParameters {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot decode source '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot write quilt to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => write!(f, "Could not {operation} '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for QuiltError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for quilting results
pub type Result<T> = std::result::Result<T, QuiltError>;

impl From<std::io::Error> for QuiltError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unnamed>"),
            operation: "access",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> QuiltError {
    QuiltError::InvalidParameters {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an out-of-bounds error for a region request
pub const fn out_of_bounds(
    origin: (usize, usize),
    extent: (usize, usize),
    bounds: (usize, usize),
) -> QuiltError {
    QuiltError::OutOfBounds {
        origin,
        extent,
        bounds,
    }
}

/// Create a shape mismatch error
pub const fn shape_mismatch(
    expected: (usize, usize, usize),
    found: (usize, usize, usize),
) -> QuiltError {
    QuiltError::ShapeMismatch { expected, found }
}
