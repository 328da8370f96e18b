//! Synthesis parameters and the block-by-block quilting state machine

use std::path::Path;

use image::{ImageBuffer, Pixel};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    algorithm::compositor::place,
    algorithm::selection::{SelectionConfig, clipped_candidate, select_block},
    io::configuration::{DEFAULT_SEED, DEFAULT_TOLERANCE, GIF_FRAME_DELAY_MS},
    io::error::{QuiltError, Result, invalid_parameter},
    io::visualization::VisualizationCapture,
    math::distance::DistanceMetric,
    spatial::canvas::Canvas,
    spatial::grid::{Extent, Point},
    spatial::layout::{Placement, ScanPlan},
};

/// Synthesis parameters controlling block layout and selection behavior
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuiltParams {
    /// Output canvas size
    pub output: Extent,
    /// Side length of square source blocks
    pub block_size: usize,
    /// Width of the strip shared by neighbouring blocks
    pub overlap: usize,
    /// Relative slack over the best candidate error
    pub tolerance: f64,
    /// Seed for the candidate choice generator
    pub seed: u64,
    /// Pixel distance used for overlap error
    pub metric: DistanceMetric,
    /// Average existing and incoming pixels along seams instead of overwriting
    pub blend_seams: bool,
    /// Cap on candidates scored per block (`None` scores every origin)
    pub max_candidates: Option<usize>,
}

impl QuiltParams {
    /// Create validated parameters with default tolerance, seed and metric
    ///
    /// # Errors
    ///
    /// Returns an error if the layout parameters are invalid, see [`Self::validate`]
    pub fn new(output: Extent, block_size: usize, overlap: usize) -> Result<Self> {
        let params = Self {
            output,
            block_size,
            overlap,
            tolerance: DEFAULT_TOLERANCE,
            seed: DEFAULT_SEED,
            metric: DistanceMetric::default(),
            blend_seams: false,
            max_candidates: None,
        };
        params.validate()?;
        Ok(params)
    }

    /// Set the candidate tolerance
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the random seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the pixel distance metric
    #[must_use]
    pub const fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Enable or disable seam blending
    #[must_use]
    pub const fn with_blend_seams(mut self, blend_seams: bool) -> Self {
        self.blend_seams = blend_seams;
        self
    }

    /// Limit the number of candidates scored per block
    #[must_use]
    pub const fn with_max_candidates(mut self, max_candidates: Option<usize>) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Check every parameter
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either output dimension or the block size is zero
    /// - The overlap is not smaller than the block size
    /// - The tolerance is negative or not finite
    /// - The candidate cap is zero
    pub fn validate(&self) -> Result<()> {
        if self.output.is_empty() {
            return Err(invalid_parameter(
                "size",
                &format!("{}x{}", self.output.width, self.output.height),
                &"output dimensions must be positive",
            ));
        }
        if self.block_size == 0 {
            return Err(invalid_parameter(
                "block_size",
                &self.block_size,
                &"block side length must be positive",
            ));
        }
        if self.overlap >= self.block_size {
            return Err(invalid_parameter(
                "overlap",
                &self.overlap,
                &format!(
                    "overlap must be smaller than the block size {}",
                    self.block_size
                ),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(invalid_parameter(
                "tolerance",
                &self.tolerance,
                &"tolerance must be a finite non-negative number",
            ));
        }
        if self.max_candidates == Some(0) {
            return Err(invalid_parameter(
                "max_candidates",
                &0,
                &"at least one candidate must be scored",
            ));
        }
        Ok(())
    }

    const fn selection_config(&self) -> SelectionConfig {
        SelectionConfig {
            block_size: self.block_size,
            tolerance: self.tolerance,
            metric: self.metric,
            max_candidates: self.max_candidates,
        }
    }
}

/// Progress of a synthesis run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SynthesisState {
    /// Canvas allocated, no block placed
    Init,
    /// Next block to place, by scan index
    Scanning(usize),
    /// Every scheduled block has been placed
    Done,
}

/// Record of one placed block
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockReport {
    /// Where the block went
    pub placement: Placement,
    /// Source origin the block was taken from
    pub origin: Point,
    /// Summed overlap error of the chosen block
    pub total_error: f64,
    /// Cells that went from unfilled to filled
    pub newly_filled: usize,
    /// Candidates within tolerance when the block was chosen
    pub pool_size: usize,
}

/// Image quilting synthesizer
///
/// Walks the scan plan one block at a time: pick a candidate, cut the seam,
/// composite. Each block is atomic and synthesis only moves forward.
pub struct Quilter<'a, P: Pixel<Subpixel = u8>> {
    source: &'a ImageBuffer<P, Vec<u8>>,
    params: QuiltParams,
    plan: ScanPlan,
    canvas: Canvas<P>,
    rng: StdRng,
    state: SynthesisState,
    reports: Vec<BlockReport>,
    /// Optional visualization capture
    pub visualization: Option<VisualizationCapture>,
}

impl<'a, P> Quilter<'a, P>
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    /// Create a synthesizer reading blocks from `source`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parameters are invalid
    /// - The source is smaller than one block
    /// - The output canvas cannot be allocated
    pub fn new(source: &'a ImageBuffer<P, Vec<u8>>, params: QuiltParams) -> Result<Self> {
        params.validate()?;

        let (width, height) = source.dimensions();
        if (width as usize) < params.block_size || (height as usize) < params.block_size {
            return Err(QuiltError::NoValidCandidates {
                block_size: params.block_size,
                source_dimensions: (width as usize, height as usize),
            });
        }

        let plan = ScanPlan::new(params.output, params.block_size, params.overlap)?;
        let canvas = Canvas::new(params.output)?;

        Ok(Self {
            source,
            params,
            reports: Vec::with_capacity(plan.len()),
            plan,
            canvas,
            rng: StdRng::seed_from_u64(params.seed),
            state: SynthesisState::Init,
            visualization: None,
        })
    }

    /// Parameters in use
    pub const fn params(&self) -> &QuiltParams {
        &self.params
    }

    /// Current state
    pub const fn state(&self) -> SynthesisState {
        self.state
    }

    /// Scheduled blocks
    pub const fn plan(&self) -> &ScanPlan {
        &self.plan
    }

    /// Total number of blocks to place
    pub const fn total_blocks(&self) -> usize {
        self.plan.len()
    }

    /// Number of blocks placed so far
    pub const fn blocks_placed(&self) -> usize {
        self.reports.len()
    }

    /// Reports for every placed block, in scan order
    pub fn reports(&self) -> &[BlockReport] {
        &self.reports
    }

    /// Canvas in its current state
    pub const fn canvas(&self) -> &Canvas<P> {
        &self.canvas
    }

    /// Enable GIF recording of synthesis progression
    pub fn enable_visualization(&mut self) {
        self.visualization = Some(VisualizationCapture::new(
            self.params.output,
            self.plan.len(),
        ));
    }

    /// Export visualization as GIF if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - GIF export fails
    pub fn export_visualization(&self, output_path: &Path) -> Result<()> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(QuiltError::InvalidParameters {
                    parameter: "visualization",
                    value: "disabled".to_string(),
                    reason: "Visualization was not enabled for this run".to_string(),
                })
            },
            |viz| viz.export_gif(output_path, GIF_FRAME_DELAY_MS),
        )
    }

    /// Place the next block
    ///
    /// Returns `false` once synthesis is done. A failed step leaves the
    /// canvas as it was before the step.
    ///
    /// # Errors
    ///
    /// Returns an error if candidate selection or compositing fails
    pub fn step(&mut self) -> Result<bool> {
        let index = match self.state {
            SynthesisState::Done => return Ok(false),
            SynthesisState::Init => 0,
            SynthesisState::Scanning(index) => index,
        };

        let Some(placement) = self.plan.placement(index) else {
            self.state = SynthesisState::Done;
            return Ok(false);
        };

        let config = self.params.selection_config();
        let selection = select_block(
            self.source,
            &self.canvas,
            &placement,
            &config,
            &mut self.rng,
        )?;

        let block = clipped_candidate(
            self.source,
            selection.origin,
            &placement,
            self.params.block_size,
        )?;
        let newly_filled = place(
            &mut self.canvas,
            placement.position,
            &block,
            &selection.cut,
            self.params.blend_seams,
        )?;

        if let Some(ref mut viz) = self.visualization {
            viz.record_patch(&self.canvas, placement.rect());
        }

        self.reports.push(BlockReport {
            placement,
            origin: selection.origin,
            total_error: selection.total_error,
            newly_filled,
            pool_size: selection.pool_size,
        });

        let next = index + 1;
        self.state = if next < self.plan.len() {
            SynthesisState::Scanning(next)
        } else {
            SynthesisState::Done
        };

        Ok(self.state != SynthesisState::Done)
    }

    /// Place every remaining block and return the finished image
    ///
    /// # Errors
    ///
    /// Returns an error if any block fails to place
    pub fn run(mut self) -> Result<ImageBuffer<P, Vec<u8>>> {
        while self.step()? {}
        self.into_image()
    }

    /// Hand over the finished canvas
    ///
    /// # Errors
    ///
    /// Returns an error if synthesis has not reached `Done` or cells remain unfilled
    pub fn into_image(self) -> Result<ImageBuffer<P, Vec<u8>>> {
        if self.state != SynthesisState::Done || !self.canvas.is_complete() {
            return Err(invalid_parameter(
                "state",
                &format!("{:?}", self.state),
                &format!(
                    "synthesis incomplete: {} of {} cells filled",
                    self.canvas.filled_count(),
                    self.params.output.area()
                ),
            ));
        }
        Ok(self.canvas.into_image())
    }
}
