//! Bounds-checked rectangular views into pixel grids
//!
//! A block never copies pixel data. Construction validates the whole region
//! against the underlying grid, so every later access stays inside it.

use crate::io::error::{Result, invalid_parameter, out_of_bounds};
use crate::spatial::grid::{Extent, PixelGrid, Point, Rect};

/// Rectangular view into a source image or canvas
#[derive(Debug)]
pub struct Block<'a, G: ?Sized> {
    grid: &'a G,
    origin: Point,
    extent: Extent,
}

impl<G: ?Sized> Clone for Block<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for Block<'_, G> {}

// Two views are the same when they look at the same grid through the same window
impl<G: ?Sized> PartialEq for Block<'_, G> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            std::ptr::from_ref(self.grid).cast::<()>(),
            std::ptr::from_ref(other.grid).cast::<()>(),
        ) && self.origin == other.origin
            && self.extent == other.extent
    }
}

impl<G: ?Sized> Eq for Block<'_, G> {}

/// Take a square block of side `size` whose top-left corner is `origin`
///
/// # Errors
///
/// Returns an error if:
/// - `size` is zero
/// - The block would extend past the right or bottom edge of `grid`
pub fn sample<G: PixelGrid + ?Sized>(grid: &G, origin: Point, size: usize) -> Result<Block<'_, G>> {
    if size == 0 {
        return Err(invalid_parameter(
            "block_size",
            &size,
            &"block side length must be positive",
        ));
    }
    Block::region(grid, Rect::new(origin, Extent::square(size)))
}

impl<'a, G: PixelGrid + ?Sized> Block<'a, G> {
    /// View an arbitrary rectangle of `grid`
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle does not fit inside the grid
    pub fn region(grid: &'a G, rect: Rect) -> Result<Self> {
        let bounds = grid.extent();
        if !rect.fits_within(bounds) {
            return Err(out_of_bounds(
                (rect.origin.x, rect.origin.y),
                (rect.extent.width, rect.extent.height),
                (bounds.width, bounds.height),
            ));
        }

        Ok(Self {
            grid,
            origin: rect.origin,
            extent: rect.extent,
        })
    }

    /// Top-left corner in grid coordinates
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Size of the view
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// The viewed rectangle in grid coordinates
    pub const fn rect(&self) -> Rect {
        Rect::new(self.origin, self.extent)
    }

    /// Channel count of the underlying grid
    pub fn channel_count(&self) -> usize {
        self.grid.channel_count()
    }

    /// Pixel at block-local `(dx, dy)`, or `None` outside the view
    pub fn pixel(&self, dx: usize, dy: usize) -> Option<&'a [u8]> {
        if !self.extent.contains(Point::new(dx, dy)) {
            return None;
        }
        self.grid.pixel(self.origin.x + dx, self.origin.y + dy)
    }

    /// Narrow the view to a block-local rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if `local` does not fit inside this block
    pub fn sub_block(&self, local: Rect) -> Result<Self> {
        if !local.fits_within(self.extent) {
            return Err(out_of_bounds(
                (local.origin.x, local.origin.y),
                (local.extent.width, local.extent.height),
                (self.extent.width, self.extent.height),
            ));
        }

        Ok(Self {
            grid: self.grid,
            origin: self.origin.offset(local.origin.x, local.origin.y),
            extent: local.extent,
        })
    }
}
