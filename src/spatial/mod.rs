//! Spatial data structures for grid layouts
//!
//! This module contains the image-space geometry of a detected grid:
//! - Cell rectangles
//! - Row-major cell indexing and one-based cell positions

/// Grid layout, rectangles and cell positions
pub mod grid;

pub use grid::{CellPosition, Grid, Rect};
