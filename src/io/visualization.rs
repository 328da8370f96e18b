//! Frame capture and GIF generation for synthesis visualization

use std::path::Path;

use image::{Delay, Frame, Pixel, Rgba, RgbaImage};

use crate::io::configuration::{UNFILLED_COLOR, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{QuiltError, Result};
use crate::spatial::canvas::Canvas;
use crate::spatial::grid::{Extent, Rect};

/// Canvas region as it looked right after a block was composited
#[derive(Debug, Clone)]
pub struct CapturedPatch {
    /// Canvas rectangle the block covered
    pub rect: Rect,
    /// RGBA copy of that rectangle
    pub pixels: RgbaImage,
}

/// Captures block placements for visualization
///
/// Only the region touched by each block is stored; frames are rebuilt by
/// replaying the patches when the GIF is exported.
pub struct VisualizationCapture {
    extent: Extent,
    patches: Vec<CapturedPatch>,
}

impl VisualizationCapture {
    /// Prepare a capture for a canvas of the given size
    pub fn new(extent: Extent, expected_blocks: usize) -> Self {
        Self {
            extent,
            patches: Vec::with_capacity(expected_blocks),
        }
    }

    /// Copy the region `rect` of `canvas`, unfilled cells shown as `UNFILLED_COLOR`
    pub fn record_patch<P: Pixel<Subpixel = u8>>(&mut self, canvas: &Canvas<P>, rect: Rect) {
        let mut pixels = RgbaImage::from_pixel(
            rect.extent.width as u32,
            rect.extent.height as u32,
            Rgba(UNFILLED_COLOR),
        );

        for dy in 0..rect.extent.height {
            for dx in 0..rect.extent.width {
                let (x, y) = (rect.origin.x + dx, rect.origin.y + dy);
                if !canvas.is_filled(x, y) {
                    continue;
                }
                if let Some(pixel) = canvas.as_image().get_pixel_checked(x as u32, y as u32) {
                    pixels.put_pixel(dx as u32, dy as u32, pixel.to_rgba());
                }
            }
        }

        self.patches.push(CapturedPatch { rect, pixels });
    }

    /// Returns all recorded patches in placement order
    pub fn patches(&self) -> &[CapturedPatch] {
        &self.patches
    }

    /// Returns the number of recorded patches
    pub const fn patch_count(&self) -> usize {
        self.patches.len()
    }

    /// Export the captured placements as an animated GIF with automatic frame skipping
    ///
    /// When `frame_delay_ms` is below what viewers reliably play back, frames
    /// are dropped so the apparent animation speed is preserved. The final
    /// frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No placements were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.patches.is_empty() {
            return Err(QuiltError::InvalidParameters {
                parameter: "visualization",
                value: "empty".to_string(),
                reason: "No block placements captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| QuiltError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| QuiltError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let export_error = |e| QuiltError::ImageExport {
            path: output_path.into(),
            source: e,
        };

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        let mut canvas = RgbaImage::from_pixel(
            self.extent.width as u32,
            self.extent.height as u32,
            Rgba(UNFILLED_COLOR),
        );

        encoder
            .encode_frame(frame_from(&canvas, effective_delay_ms))
            .map_err(export_error)?;

        for (count, patch) in self.patches.iter().enumerate() {
            apply_patch(&mut canvas, patch);
            let is_last = count + 1 == self.patches.len();
            if (count + 1) % skip_factor == 0 || is_last {
                encoder
                    .encode_frame(frame_from(&canvas, effective_delay_ms))
                    .map_err(export_error)?;
            }
        }

        // Final frame displays longer for better visibility
        encoder
            .encode_frame(frame_from(&canvas, effective_delay_ms * 25))
            .map_err(export_error)?;

        Ok(())
    }
}

fn apply_patch(canvas: &mut RgbaImage, patch: &CapturedPatch) {
    for (dx, dy, pixel) in patch.pixels.enumerate_pixels() {
        let x = patch.rect.origin.x as u32 + dx;
        let y = patch.rect.origin.y as u32 + dy;
        if let Some(target) = canvas.get_pixel_mut_checked(x, y) {
            *target = *pixel;
        }
    }
}

fn frame_from(canvas: &RgbaImage, delay_ms: u32) -> Frame {
    Frame::from_parts(
        canvas.clone(),
        0,
        0,
        Delay::from_numer_denom_ms(delay_ms, 1),
    )
}
