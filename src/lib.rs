//! Image quilting texture synthesis with minimum-error boundary cuts
//!
//! The synthesizer tiles an output canvas with overlapping square blocks
//! sampled from a source image. Each block is chosen among the candidates
//! whose overlap error is close to the best, and stitched in along a
//! dynamic-programming seam so the boundary follows the path of least
//! visible difference.

#![forbid(unsafe_code)]

/// Core synthesis: error surfaces, seams, candidate selection and compositing
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for pixel distances
pub mod math;
/// Pixel grids, blocks, the canvas and scan layout
pub mod spatial;

pub use algorithm::executor::{QuiltParams, Quilter};
pub use io::error::{QuiltError, Result};
