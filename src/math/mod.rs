//! Mathematical utilities for the algorithm

/// Pixel distance metrics
pub mod distance;
