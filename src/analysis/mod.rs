//! Image analysis: brightness profiles, grid detection and color sampling

/// Gap-based grid detection with brute-force fallback
pub mod detection;
/// Grayscale conversion and foreground extraction
pub mod luminance;
/// Per-cell color sampling
pub mod sampling;
