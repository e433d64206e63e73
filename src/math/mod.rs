//! Numeric utilities shared by detection and classification

/// RGB color type and color-space distances
pub mod color;
/// Mean, median, deviation and z-score helpers
pub mod statistics;
