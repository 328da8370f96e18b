/// Block compositing along boundary cuts
pub mod compositor;
/// Overlap error surfaces
pub mod error_surface;
/// Synthesis parameters and the block-by-block executor
pub mod executor;
/// Minimum-error seam search and L-shaped boundary cuts
pub mod seam;
/// Candidate block search with tolerance-based selection
pub mod selection;
