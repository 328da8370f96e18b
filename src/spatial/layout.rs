//! Raster scan order and overlap geometry for block placement
//!
//! Blocks advance by `block_size - overlap` along each axis so neighbouring
//! blocks share an `overlap`-wide strip. A block is only scheduled when it
//! reaches at least one cell past the strip it shares with its predecessor,
//! and blocks hanging over the right or bottom edge are clipped.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Extent, Point, Rect};

/// Widths of the already-filled strips along a block's left and top edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlap {
    /// Columns shared with the block to the left (0 in the first column)
    pub left: usize,
    /// Rows shared with the block above (0 in the first row)
    pub top: usize,
}

impl Overlap {
    /// True for the very first block, which has no neighbours
    pub const fn is_empty(&self) -> bool {
        self.left == 0 && self.top == 0
    }

    /// Block-local strip along the left edge spanning the full block height
    pub fn left_strip(&self, extent: Extent) -> Option<Rect> {
        let width = self.left.min(extent.width);
        if width > 0 && extent.height > 0 {
            Some(Rect::at_origin(Extent::new(width, extent.height)))
        } else {
            None
        }
    }

    /// Block-local strip along the top edge spanning the full block width
    pub fn top_strip(&self, extent: Extent) -> Option<Rect> {
        let height = self.top.min(extent.height);
        if height > 0 && extent.width > 0 {
            Some(Rect::at_origin(Extent::new(extent.width, height)))
        } else {
            None
        }
    }

    /// Top strip with the corner shared by the left strip removed
    ///
    /// Together with [`Self::left_strip`] this partitions the overlap, so
    /// summing costs over both never counts the corner twice.
    pub fn top_strip_excluding_corner(&self, extent: Extent) -> Option<Rect> {
        let left = self.left.min(extent.width);
        let height = self.top.min(extent.height);
        let width = extent.width - left;
        if height > 0 && width > 0 {
            Some(Rect::new(Point::new(left, 0), Extent::new(width, height)))
        } else {
            None
        }
    }

    /// Whether block-local `(dx, dy)` lies in either strip
    pub const fn contains(&self, dx: usize, dy: usize) -> bool {
        dx < self.left || dy < self.top
    }
}

/// One scheduled block: where it goes, how much of it fits, what it overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position in scan order
    pub index: usize,
    /// Top-left canvas cell covered by the block
    pub position: Point,
    /// Block extent after clipping to the canvas
    pub extent: Extent,
    /// Strips shared with earlier blocks
    pub overlap: Overlap,
}

impl Placement {
    /// Canvas rectangle covered by this placement
    pub const fn rect(&self) -> Rect {
        Rect::new(self.position, self.extent)
    }
}

/// Raster-order schedule of every block needed to cover a canvas
#[derive(Debug, Clone)]
pub struct ScanPlan {
    canvas: Extent,
    block_size: usize,
    overlap: usize,
    columns: Vec<usize>,
    rows: Vec<usize>,
}

impl ScanPlan {
    /// Build the schedule for a canvas
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The canvas has a zero side
    /// - `block_size` is zero
    /// - `overlap` is not smaller than `block_size`
    pub fn new(canvas: Extent, block_size: usize, overlap: usize) -> Result<Self> {
        if canvas.is_empty() {
            return Err(invalid_parameter(
                "size",
                &format!("{}x{}", canvas.width, canvas.height),
                &"output dimensions must be positive",
            ));
        }
        if block_size == 0 {
            return Err(invalid_parameter(
                "block_size",
                &block_size,
                &"block side length must be positive",
            ));
        }
        if overlap >= block_size {
            return Err(invalid_parameter(
                "overlap",
                &overlap,
                &format!("overlap must be smaller than the block size {block_size}"),
            ));
        }

        Ok(Self {
            canvas,
            block_size,
            overlap,
            columns: axis_origins(canvas.width, block_size, overlap),
            rows: axis_origins(canvas.height, block_size, overlap),
        })
    }

    /// Total number of blocks
    pub const fn len(&self) -> usize {
        self.columns.len() * self.rows.len()
    }

    /// True when no blocks are scheduled
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocks per row and per column as (columns, rows)
    pub const fn grid_shape(&self) -> (usize, usize) {
        (self.columns.len(), self.rows.len())
    }

    /// Canvas being covered
    pub const fn canvas(&self) -> Extent {
        self.canvas
    }

    /// The `index`-th block in raster order
    pub fn placement(&self, index: usize) -> Option<Placement> {
        let per_row = self.columns.len();
        if per_row == 0 {
            return None;
        }
        let column = index % per_row;
        let row = index / per_row;
        let x = self.columns.get(column).copied()?;
        let y = self.rows.get(row).copied()?;

        let extent = Extent::new(
            self.block_size.min(self.canvas.width - x),
            self.block_size.min(self.canvas.height - y),
        );
        let overlap = Overlap {
            left: if column > 0 { self.overlap } else { 0 },
            top: if row > 0 { self.overlap } else { 0 },
        };

        Some(Placement {
            index,
            position: Point::new(x, y),
            extent,
            overlap,
        })
    }

    /// All placements in raster order
    pub fn iter(&self) -> impl Iterator<Item = Placement> + '_ {
        (0..self.len()).filter_map(|index| self.placement(index))
    }
}

/// Block origins along one axis
///
/// After the first block, a block starting at `p` only adds cells when
/// `p + overlap < length`, since `[p, p + overlap)` is already covered.
fn axis_origins(length: usize, block_size: usize, overlap: usize) -> Vec<usize> {
    let step = block_size - overlap;
    let mut origins = vec![0];
    let mut next = step;
    while next + overlap < length {
        origins.push(next);
        next += step;
    }
    origins
}
