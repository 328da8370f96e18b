//! Source image decoding and synthesized image export

use std::path::Path;

use image::DynamicImage;

use crate::io::error::{QuiltError, Result};
use crate::spatial::grid::SourceImage;

/// Decode a source image, keeping alpha only when the file has it
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_source(path: &Path) -> Result<SourceImage> {
    let image = image::open(path).map_err(|e| QuiltError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(SourceImage::from(image))
}

/// Encode an image to `output_path`, format chosen by extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_image(image: &DynamicImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| QuiltError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| QuiltError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
