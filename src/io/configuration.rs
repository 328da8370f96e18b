//! Synthesis defaults and runtime display settings

// Defaults mirror the flags of the quilt command
/// Default output side length in pixels
pub const DEFAULT_SIZE: usize = 1024;

/// Default block side length in pixels
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Default overlap width in pixels (must stay below the block size)
pub const DEFAULT_OVERLAP: usize = 12;

/// Relative error slack over the best candidate when picking a block
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Fixed seed for reproducible synthesis
pub const DEFAULT_SEED: u64 = 42;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_OUTPUT_DIMENSION: usize = 16_384;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_quilt";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Color shown for canvas cells that have not been filled yet
pub const UNFILLED_COLOR: [u8; 4] = [128, 128, 128, 255];

// Input discovery
/// File extensions picked up when scanning a directory
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];
