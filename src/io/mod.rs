//! Input/output operations, configuration and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Default parameters and display settings
pub mod configuration;
/// Error types shared by the whole crate
pub mod error;
/// Source image loading and result export
pub mod image;
/// Progress bars for batch synthesis
pub mod progress;
/// Animated GIF capture of the synthesis
pub mod visualization;
