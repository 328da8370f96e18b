//! Command-line interface for quilting single images or whole directories

use crate::algorithm::executor::{QuiltParams, Quilter};
use crate::io::configuration::{
    DEFAULT_BLOCK_SIZE, DEFAULT_OVERLAP, DEFAULT_SEED, DEFAULT_SIZE, DEFAULT_TOLERANCE,
    OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{load_source, save_image};
use crate::io::progress::ProgressManager;
use crate::math::distance::DistanceMetric;
use crate::spatial::grid::{Extent, SourceImage};
use clap::Parser;
use image::{DynamicImage, ImageBuffer, Pixel};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "quiltex")]
#[command(
    author,
    version,
    about = "Synthesize larger textures from a sample by image quilting"
)]
/// Command-line arguments for the quilting tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image or directory of images to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output image path (single input only; defaults to <input>_quilt.png)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output side length for a square result
    #[arg(short, long, conflicts_with_all = ["width", "height"])]
    pub size: Option<usize>,

    /// Output width in pixels (implies square if height not specified)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Side length of the square blocks sampled from the source
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub blocksize: usize,

    /// Width of the strip shared by neighbouring blocks
    #[arg(short, long, default_value_t = DEFAULT_OVERLAP)]
    pub overlap: usize,

    /// Accept candidates whose error is within this fraction of the best
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Random seed for reproducible synthesis
    #[arg(short = 'S', long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Pixel distance used to compare overlaps
    #[arg(short, long, value_enum, default_value_t = DistanceMetric::SquaredEuclidean)]
    pub metric: DistanceMetric,

    /// Average the two sides of each seam instead of a hard cut
    #[arg(long)]
    pub blend: bool,

    /// Score at most this many random candidates per block (default: all)
    ///
    /// Every source origin is scored when unset. On large sources that
    /// dominates run time, so pass a cap such as `-c 2000` to score a seeded
    /// random subset of origins for each block instead.
    #[arg(short, long)]
    pub candidates: Option<usize>,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Output canvas size resolved from `--size`, `--width` and `--height`
    pub fn output_extent(&self) -> Extent {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Extent::new(w, h),
            (Some(w), None) => Extent::square(w),
            (None, Some(h)) => Extent::square(h),
            (None, None) => Extent::square(self.size.unwrap_or(DEFAULT_SIZE)),
        }
    }

    /// Synthesis parameters described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter fails validation
    pub fn quilt_params(&self) -> Result<QuiltParams> {
        let params = QuiltParams::new(self.output_extent(), self.blocksize, self.overlap)?
            .with_tolerance(self.tolerance)
            .with_seed(self.seed)
            .with_metric(self.metric)
            .with_blend_seams(self.blend)
            .with_max_candidates(self.candidates);
        params.validate()?;
        Ok(params)
    }
}

/// Runs the quilter over every input named by the command line
pub struct FileProcessor {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl FileProcessor {
    /// Wrap parsed arguments; progress bars are created unless `--quiet`
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        Self { cli, progress }
    }

    /// Quilt every selected input and write the results
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, the target cannot be
    /// read, or any image fails to load, synthesize or save
    pub fn process(&mut self) -> Result<()> {
        let params = self.cli.quilt_params()?;
        let inputs = self.select_inputs()?;
        if inputs.is_empty() {
            return Ok(());
        }

        if let Some(progress) = self.progress.as_mut() {
            progress.initialize(inputs.len());
        }
        for (index, input) in inputs.iter().enumerate() {
            self.quilt_file(input, index, params)?;
        }
        if let Some(progress) = &self.progress {
            progress.finish();
        }

        Ok(())
    }

    fn select_inputs(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        let candidates = if target.is_file() {
            vec![target.clone()]
        } else if target.is_dir() {
            if self.cli.output.is_some() {
                return Err(invalid_parameter(
                    "output",
                    &target.display(),
                    &"an explicit output path requires a single input file",
                ));
            }
            let mut images = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if has_supported_extension(&path) && !is_quilt_output(&path) {
                    images.push(path);
                }
            }
            images.sort();
            images
        } else {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be an image file or directory",
            ));
        };

        Ok(candidates
            .into_iter()
            .filter(|input| self.needs_output(input))
            .collect())
    }

    fn needs_output(&self, input: &Path) -> bool {
        if !self.cli.skip_existing() || !self.output_path_for(input).exists() {
            return true;
        }
        // User-facing notice; the library itself never prints
        #[allow(clippy::print_stderr)]
        if !self.cli.quiet {
            eprintln!("Skipping: {} (output exists)", input.display());
        }
        false
    }

    fn quilt_file(&mut self, input: &Path, index: usize, params: QuiltParams) -> Result<()> {
        let started = Instant::now();

        let quilted = match load_source(input)? {
            SourceImage::Rgb8(buffer) => {
                DynamicImage::ImageRgb8(self.synthesize(&buffer, params, index, input)?)
            }
            SourceImage::Rgba8(buffer) => {
                DynamicImage::ImageRgba8(self.synthesize(&buffer, params, index, input)?)
            }
        };
        save_image(&quilted, &self.output_path_for(input))?;

        if let Some(progress) = self.progress.as_mut() {
            progress.complete_file(index, started.elapsed());
        }
        Ok(())
    }

    fn synthesize<P>(
        &mut self,
        source: &ImageBuffer<P, Vec<u8>>,
        params: QuiltParams,
        index: usize,
        input: &Path,
    ) -> Result<ImageBuffer<P, Vec<u8>>>
    where
        P: Pixel<Subpixel = u8> + Send + Sync,
    {
        let started = Instant::now();
        let mut quilter = Quilter::new(source, params)?;
        if self.cli.visualize {
            quilter.enable_visualization();
        }
        if let Some(progress) = self.progress.as_mut() {
            progress.start_file(index, input, quilter.total_blocks());
        }

        while quilter.step()? {
            if let Some(progress) = self.progress.as_mut() {
                progress.update_blocks(index, quilter.blocks_placed(), started.elapsed());
            }
        }

        if quilter.visualization.is_some() {
            quilter.export_visualization(&Self::get_visualization_path(input))?;
        }
        quilter.into_image()
    }

    fn output_path_for(&self, input: &Path) -> PathBuf {
        self.cli
            .output
            .as_ref()
            .map_or_else(|| Self::get_output_path(input), Clone::clone)
    }

    /// Default output location: `<stem>_quilt.png` next to the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, "png")
    }

    /// Visualization location: `<stem>_quilt.gif` next to the input
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, "gif")
    }
}

fn sibling_with_suffix(input: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{extension}"))
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

// Results written into the scanned directory must not be quilted again
fn is_quilt_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
