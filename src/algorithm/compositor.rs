//! Writing chosen blocks into the canvas along their boundary cut
//!
//! Unfilled cells always take the incoming pixel. Filled cells are resolved
//! by the cut: existing side kept, incoming side overwritten, and cells on the
//! seam either overwritten or averaged when blending is enabled. All checks
//! run before the first write, so a rejected block leaves the canvas untouched.

use image::Pixel;

use crate::algorithm::seam::{BoundaryCut, CutSide};
use crate::io::error::{Result, out_of_bounds, shape_mismatch};
use crate::spatial::block::Block;
use crate::spatial::canvas::Canvas;
use crate::spatial::grid::{PixelGrid, Point, Rect};

/// Composite `block` into `canvas` with its top-left corner at `position`
///
/// Returns the number of cells that went from unfilled to filled.
///
/// # Errors
///
/// Returns an error if:
/// - The block would extend past the canvas
/// - The block's channel count differs from the canvas
pub fn place<P, G>(
    canvas: &mut Canvas<P>,
    position: Point,
    block: &Block<'_, G>,
    cut: &BoundaryCut,
    blend: bool,
) -> Result<usize>
where
    P: Pixel<Subpixel = u8>,
    G: PixelGrid + ?Sized,
{
    let extent = block.extent();
    let bounds = canvas.extent();
    if !Rect::new(position, extent).fits_within(bounds) {
        return Err(out_of_bounds(
            (position.x, position.y),
            (extent.width, extent.height),
            (bounds.width, bounds.height),
        ));
    }
    if block.channel_count() != canvas.channel_count() {
        return Err(shape_mismatch(
            (extent.width, extent.height, canvas.channel_count()),
            (extent.width, extent.height, block.channel_count()),
        ));
    }

    let mut newly_filled = 0;
    for dy in 0..extent.height {
        for dx in 0..extent.width {
            let Some(incoming) = block.pixel(dx, dy) else {
                continue;
            };
            let (x, y) = (position.x + dx, position.y + dy);

            if canvas.fill(x, y, incoming) {
                newly_filled += 1;
                continue;
            }

            match cut.classify(dx, dy) {
                CutSide::Existing => {}
                CutSide::Seam if blend => canvas.blend(x, y, incoming)?,
                CutSide::Seam | CutSide::Incoming => canvas.overwrite(x, y, incoming)?,
            }
        }
    }

    Ok(newly_filled)
}
