//! Minimum-error boundary cuts through overlap strips
//!
//! A vertical seam picks one column per row of an error surface such that
//! consecutive rows move by at most one column, minimising the summed cost.
//! Cumulative costs follow
//! `C(i, j) = E(i, j) + min(C(i-1, j-1), C(i-1, j), C(i-1, j+1))`, with
//! columns outside the surface ignored. Ties resolve to the straight-above
//! predecessor, then left, then right, and the backtrack starts from the
//! lowest-indexed minimum of the last row, so identical surfaces always yield
//! identical seams.
//!
//! Horizontal seams run the same search on the transposed surface, and a
//! [`BoundaryCut`] combines a left and a top seam into the L-shaped boundary
//! used for blocks that overlap on both edges.

use ndarray::Array2;

use crate::algorithm::error_surface::ErrorSurface;
use crate::io::error::{QuiltError, Result};

/// Cut offsets along a strip, one per line
///
/// For a vertical seam entry `i` is the cut column in row `i`; for a
/// horizontal seam entry `i` is the cut row in column `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeamPath {
    cuts: Vec<usize>,
}

impl SeamPath {
    /// Wrap precomputed cut offsets
    pub const fn from_cuts(cuts: Vec<usize>) -> Self {
        Self { cuts }
    }

    /// All cut offsets in order
    pub const fn cuts(&self) -> &[usize] {
        self.cuts.as_slice()
    }

    /// Cut offset for line `index`
    pub fn cut(&self, index: usize) -> Option<usize> {
        self.cuts.get(index).copied()
    }

    /// Number of lines the seam spans
    pub const fn len(&self) -> usize {
        self.cuts.len()
    }

    /// True for a seam spanning nothing
    pub const fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Whether consecutive offsets never differ by more than one
    pub fn is_connected(&self) -> bool {
        self.cuts.windows(2).all(|pair| match pair {
            [a, b] => a.abs_diff(*b) <= 1,
            _ => true,
        })
    }

    /// Summed surface cost along the path, reading `(line, offset)` cells
    pub fn cost(&self, surface: &ErrorSurface) -> f64 {
        self.cuts
            .iter()
            .enumerate()
            .map(|(row, &col)| surface.get(row, col).unwrap_or(0.0))
            .sum()
    }
}

/// Find the minimum-cost top-to-bottom seam through `surface`
///
/// # Errors
///
/// Returns an error if the surface has zero rows or zero columns
pub fn find_seam(surface: &ErrorSurface) -> Result<SeamPath> {
    let rows = surface.rows();
    let cols = surface.cols();
    if rows == 0 || cols == 0 {
        return Err(QuiltError::EmptySurface { rows, cols });
    }

    let cumulative = cumulative_costs(surface);

    let last_row = rows - 1;
    let mut col = 0;
    let mut best = f64::INFINITY;
    for j in 0..cols {
        let cost = cumulative
            .get([last_row, j])
            .copied()
            .unwrap_or(f64::INFINITY);
        if cost < best {
            best = cost;
            col = j;
        }
    }

    let mut cuts = vec![0; rows];
    if let Some(slot) = cuts.get_mut(last_row) {
        *slot = col;
    }
    for row in (1..rows).rev() {
        col = best_predecessor(&cumulative, row - 1, col).0;
        if let Some(slot) = cuts.get_mut(row - 1) {
            *slot = col;
        }
    }

    Ok(SeamPath::from_cuts(cuts))
}

/// Find the minimum-cost left-to-right seam through a horizontal strip
///
/// # Errors
///
/// Returns an error if the surface has zero rows or zero columns
pub fn find_horizontal_seam(surface: &ErrorSurface) -> Result<SeamPath> {
    find_seam(&surface.transposed())
}

/// Dynamic-programming table of cheapest connected path costs ending at each cell
pub fn cumulative_costs(surface: &ErrorSurface) -> Array2<f64> {
    let mut cumulative = surface.costs().clone();
    let (rows, cols) = cumulative.dim();

    for row in 1..rows {
        for col in 0..cols {
            let (_, predecessor_cost) = best_predecessor(&cumulative, row - 1, col);
            if let Some(cell) = cumulative.get_mut([row, col]) {
                *cell += predecessor_cost;
            }
        }
    }

    cumulative
}

/// Cheapest neighbour of `col` in `row`, preferring straight, then left, then right
fn best_predecessor(cumulative: &Array2<f64>, row: usize, col: usize) -> (usize, f64) {
    let cols = cumulative.ncols();
    let cost_at = |j: usize| cumulative.get([row, j]).copied().unwrap_or(f64::INFINITY);

    let mut best = (col, cost_at(col));
    let left = col.checked_sub(1);
    let right = (col + 1 < cols).then_some(col + 1);
    for neighbour in [left, right].into_iter().flatten() {
        let cost = cost_at(neighbour);
        if cost < best.1 {
            best = (neighbour, cost);
        }
    }
    best
}

/// Which side of the boundary a block cell falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutSide {
    /// Keep the pixel already on the canvas
    Existing,
    /// Cell lies on the seam itself
    Seam,
    /// Take the pixel from the incoming block
    Incoming,
}

/// Boundary between existing canvas content and an incoming block
///
/// Holds an optional vertical seam through the left strip and an optional
/// horizontal seam through the top strip, both in block-local coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundaryCut {
    left: Option<SeamPath>,
    top: Option<SeamPath>,
}

impl BoundaryCut {
    /// Combine left and top seams
    pub const fn new(left: Option<SeamPath>, top: Option<SeamPath>) -> Self {
        Self { left, top }
    }

    /// Cut for a block without neighbours: everything is incoming
    pub const fn none() -> Self {
        Self {
            left: None,
            top: None,
        }
    }

    /// Vertical seam through the left strip
    pub const fn left(&self) -> Option<&SeamPath> {
        self.left.as_ref()
    }

    /// Horizontal seam through the top strip
    pub const fn top(&self) -> Option<&SeamPath> {
        self.top.as_ref()
    }

    /// Classify block-local cell `(dx, dy)`
    ///
    /// A cell on the existing side of either seam stays existing, which
    /// carves the L-shaped boundary in the shared corner.
    pub fn classify(&self, dx: usize, dy: usize) -> CutSide {
        let left = self.left.as_ref().and_then(|seam| seam.cut(dy));
        let top = self.top.as_ref().and_then(|seam| seam.cut(dx));
        let sides = [
            left.map(|cut| side_of(dx, cut)),
            top.map(|cut| side_of(dy, cut)),
        ];

        if sides.contains(&Some(CutSide::Existing)) {
            CutSide::Existing
        } else if sides.contains(&Some(CutSide::Seam)) {
            CutSide::Seam
        } else {
            CutSide::Incoming
        }
    }
}

const fn side_of(offset: usize, cut: usize) -> CutSide {
    if offset < cut {
        CutSide::Existing
    } else if offset == cut {
        CutSide::Seam
    } else {
        CutSide::Incoming
    }
}
