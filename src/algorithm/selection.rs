//! Candidate block search with tolerance-based random choice
//!
//! Every source origin that keeps a full block inside the source is a
//! candidate. Candidates are scored by their summed overlap error against the
//! canvas, the ones within `(1 + tolerance)` of the best score form the pool,
//! and one is drawn uniformly from the pool. Scoring only reads the source and
//! canvas, so it runs in parallel; scores are collected in enumeration order
//! and the draw uses the caller's seeded generator, keeping results
//! reproducible.

use rand::Rng;
use rand::seq::index;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::algorithm::error_surface::{ErrorSurface, compute_overlap_error, overlap_cost};
use crate::algorithm::seam::{BoundaryCut, find_horizontal_seam, find_seam};
use crate::io::error::{QuiltError, Result};
use crate::math::distance::DistanceMetric;
use crate::spatial::block::{Block, sample};
use crate::spatial::grid::{PixelGrid, Point, Rect};
use crate::spatial::layout::Placement;

/// Parameters controlling one candidate search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionConfig {
    /// Side length of source blocks
    pub block_size: usize,
    /// Relative slack over the best score; 0 keeps only the minima
    pub tolerance: f64,
    /// Pixel distance used for scoring
    pub metric: DistanceMetric,
    /// Score at most this many randomly chosen origins (`None` scores all)
    pub max_candidates: Option<usize>,
}

/// Error surfaces for the strips a placement shares with earlier blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlapSurfaces {
    /// Surface over the left strip, full block height
    pub left: Option<ErrorSurface>,
    /// Surface over the top strip, full block width
    pub top: Option<ErrorSurface>,
}

/// Outcome of a candidate search
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Source origin of the chosen block
    pub origin: Point,
    /// Error surfaces of the chosen block against the canvas
    pub surfaces: OverlapSurfaces,
    /// Boundary cut derived from the surfaces
    pub cut: BoundaryCut,
    /// Summed overlap error of the chosen block
    pub total_error: f64,
    /// Number of candidates scored
    pub candidates_scored: usize,
    /// Number of candidates that were within tolerance
    pub pool_size: usize,
}

/// Number of valid block origins along each axis of a source, as (columns, rows)
///
/// # Errors
///
/// Returns an error if the source is narrower or shorter than one block
pub fn origin_grid<S: PixelGrid + ?Sized>(source: &S, block_size: usize) -> Result<(usize, usize)> {
    let extent = source.extent();
    if block_size == 0 || extent.width < block_size || extent.height < block_size {
        return Err(QuiltError::NoValidCandidates {
            block_size,
            source_dimensions: (extent.width, extent.height),
        });
    }
    Ok((
        extent.width - block_size + 1,
        extent.height - block_size + 1,
    ))
}

/// Summed overlap error of the source block at `origin` for a placement
///
/// # Errors
///
/// Returns an error if the source block or the canvas region is out of bounds
pub fn score_candidate<S, C>(
    source: &S,
    canvas: &C,
    origin: Point,
    placement: &Placement,
    config: &SelectionConfig,
) -> Result<f64>
where
    S: PixelGrid + ?Sized,
    C: PixelGrid + ?Sized,
{
    if placement.overlap.is_empty() {
        return Ok(0.0);
    }
    let candidate = clipped_candidate(source, origin, placement, config.block_size)?;
    let existing = Block::region(canvas, placement.rect())?;
    overlap_cost(&candidate, &existing, placement.overlap, config.metric)
}

/// Choose the source block to place next and precompute its boundary cut
///
/// # Errors
///
/// Returns an error if:
/// - The source is smaller than one block
/// - The placement region lies outside the canvas
/// - Surface or seam computation fails for the chosen block
pub fn select_block<S, C, R>(
    source: &S,
    canvas: &C,
    placement: &Placement,
    config: &SelectionConfig,
    rng: &mut R,
) -> Result<Selection>
where
    S: PixelGrid + Sync + ?Sized,
    C: PixelGrid + Sync + ?Sized,
    R: Rng,
{
    let (columns, rows) = origin_grid(source, config.block_size)?;
    let total = columns * rows;

    let indices: Vec<usize> = match config.max_candidates {
        Some(limit) if limit > 0 && limit < total => {
            let mut chosen = index::sample(rng, total, limit).into_vec();
            chosen.sort_unstable();
            chosen
        }
        _ => (0..total).collect(),
    };
    let origin_at = |i: usize| Point::new(i % columns, i / columns);

    let scores = indices
        .par_iter()
        .map(|&i| score_candidate(source, canvas, origin_at(i), placement, config))
        .collect::<Result<Vec<f64>>>()?;

    let best = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let threshold = best * (1.0 + config.tolerance);
    let pool: Vec<(usize, f64)> = indices
        .iter()
        .zip(&scores)
        .filter(|&(_, &score)| score <= threshold)
        .map(|(&i, &score)| (i, score))
        .collect();

    let pick = rng.random_range(0..pool.len().max(1));
    let Some(&(chosen, total_error)) = pool.get(pick) else {
        return Err(QuiltError::NoValidCandidates {
            block_size: config.block_size,
            source_dimensions: (source.extent().width, source.extent().height),
        });
    };
    let origin = origin_at(chosen);

    let (surfaces, cut) = boundary_for(source, canvas, origin, placement, config)?;

    Ok(Selection {
        origin,
        surfaces,
        cut,
        total_error,
        candidates_scored: indices.len(),
        pool_size: pool.len(),
    })
}

/// Error surfaces and seams of one candidate against the canvas
///
/// # Errors
///
/// Returns an error if the candidate or canvas region is out of bounds
pub fn boundary_for<S, C>(
    source: &S,
    canvas: &C,
    origin: Point,
    placement: &Placement,
    config: &SelectionConfig,
) -> Result<(OverlapSurfaces, BoundaryCut)>
where
    S: PixelGrid + ?Sized,
    C: PixelGrid + ?Sized,
{
    if placement.overlap.is_empty() {
        return Ok((OverlapSurfaces::default(), BoundaryCut::none()));
    }

    let candidate = clipped_candidate(source, origin, placement, config.block_size)?;
    let existing = Block::region(canvas, placement.rect())?;
    let strip_surface = |strip: Rect| -> Result<ErrorSurface> {
        compute_overlap_error(
            &candidate.sub_block(strip)?,
            &existing.sub_block(strip)?,
            config.metric,
        )
    };

    let left = placement
        .overlap
        .left_strip(placement.extent)
        .map(strip_surface)
        .transpose()?;
    let top = placement
        .overlap
        .top_strip(placement.extent)
        .map(strip_surface)
        .transpose()?;

    let cut = BoundaryCut::new(
        left.as_ref().map(find_seam).transpose()?,
        top.as_ref().map(find_horizontal_seam).transpose()?,
    );

    Ok((OverlapSurfaces { left, top }, cut))
}

/// Source block at `origin`, cropped to the placement's clipped extent
///
/// # Errors
///
/// Returns an error if the full block does not fit in the source
pub fn clipped_candidate<'a, S: PixelGrid + ?Sized>(
    source: &'a S,
    origin: Point,
    placement: &Placement,
    block_size: usize,
) -> Result<Block<'a, S>> {
    sample(source, origin, block_size)?.sub_block(Rect::at_origin(placement.extent))
}
