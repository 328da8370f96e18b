//! Spatial data structures for quilting
//!
//! This module contains spatial-related functionality including:
//! - Coordinates and the pixel grid capability
//! - Bounds-checked block views
//! - The output canvas and its fill mask
//! - Scan order and overlap geometry

/// Bounds-checked block views into pixel grids
pub mod block;
/// Output canvas with fill tracking
pub mod canvas;
/// Coordinates, extents and the pixel grid trait
pub mod grid;
/// Scan order and overlap geometry
pub mod layout;

pub use block::{Block, sample};
pub use canvas::Canvas;
pub use grid::{Extent, PixelGrid, Point, Rect, SourceImage};
pub use layout::{Overlap, Placement, ScanPlan};
