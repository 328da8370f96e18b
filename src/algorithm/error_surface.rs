//! Per-pixel cost surfaces over overlap strips
//!
//! A surface holds one non-negative cost per cell of an overlap strip: the
//! distance between the candidate pixel and the pixel already on the canvas.
//! Rows follow the strip's `y` axis and columns its `x` axis.

use ndarray::Array2;

use crate::io::error::{Result, shape_mismatch};
use crate::math::distance::DistanceMetric;
use crate::spatial::block::Block;
use crate::spatial::grid::PixelGrid;
use crate::spatial::layout::Overlap;

/// Cost grid with the same shape as an overlap strip
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSurface {
    costs: Array2<f64>,
}

impl ErrorSurface {
    /// Wrap a precomputed `(rows, cols)` cost array
    pub const fn from_costs(costs: Array2<f64>) -> Self {
        Self { costs }
    }

    /// Underlying cost array
    pub const fn costs(&self) -> &Array2<f64> {
        &self.costs
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.costs.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.costs.ncols()
    }

    /// True when the surface has no cells
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Cost at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.costs.get([row, col]).copied()
    }

    /// Sum of all costs
    pub fn total(&self) -> f64 {
        self.costs.sum()
    }

    /// Swap rows and columns, turning a horizontal strip into a vertical one
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self {
            costs: self.costs.t().to_owned(),
        }
    }
}

/// Compute the cost surface between a candidate region and the existing canvas region
///
/// # Errors
///
/// Returns an error if the two regions differ in width, height or channel count
pub fn compute_overlap_error<A, B>(
    candidate: &Block<'_, A>,
    existing: &Block<'_, B>,
    metric: DistanceMetric,
) -> Result<ErrorSurface>
where
    A: PixelGrid + ?Sized,
    B: PixelGrid + ?Sized,
{
    check_shapes(candidate, existing)?;

    let extent = candidate.extent();
    let costs = Array2::from_shape_fn((extent.height, extent.width), |(row, col)| {
        match (candidate.pixel(col, row), existing.pixel(col, row)) {
            (Some(a), Some(b)) => metric.distance(a, b),
            _ => 0.0,
        }
    });

    Ok(ErrorSurface::from_costs(costs))
}

/// Total overlap error of a candidate without materialising surfaces
///
/// Both blocks cover the clipped placement extent. Sums the left strip and
/// the top strip minus the shared corner, so each overlap cell counts once.
/// A placement with no overlap costs nothing.
///
/// # Errors
///
/// Returns an error if the blocks differ in shape or the overlap exceeds them
pub fn overlap_cost<A, B>(
    candidate: &Block<'_, A>,
    existing: &Block<'_, B>,
    overlap: Overlap,
    metric: DistanceMetric,
) -> Result<f64>
where
    A: PixelGrid + ?Sized,
    B: PixelGrid + ?Sized,
{
    check_shapes(candidate, existing)?;

    let extent = candidate.extent();
    let strips = [
        overlap.left_strip(extent),
        overlap.top_strip_excluding_corner(extent),
    ];

    let mut total = 0.0;
    for strip in strips.into_iter().flatten() {
        let candidate_strip = candidate.sub_block(strip)?;
        let existing_strip = existing.sub_block(strip)?;
        for dy in 0..strip.extent.height {
            for dx in 0..strip.extent.width {
                if let (Some(a), Some(b)) =
                    (candidate_strip.pixel(dx, dy), existing_strip.pixel(dx, dy))
                {
                    total += metric.distance(a, b);
                }
            }
        }
    }

    Ok(total)
}

fn check_shapes<A, B>(candidate: &Block<'_, A>, existing: &Block<'_, B>) -> Result<()>
where
    A: PixelGrid + ?Sized,
    B: PixelGrid + ?Sized,
{
    let expected = (
        candidate.extent().width,
        candidate.extent().height,
        candidate.channel_count(),
    );
    let found = (
        existing.extent().width,
        existing.extent().height,
        existing.channel_count(),
    );
    if expected == found {
        Ok(())
    } else {
        Err(shape_mismatch(expected, found))
    }
}
