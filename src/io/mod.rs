//! Input/output around the analysis core

/// Command-line parsing and batch processing
pub mod cli;
/// Tuning constants and serializable configuration
pub mod configuration;
/// Crate-wide error type
pub mod error;
/// Image decoding and capture-region cropping
pub mod image;
/// Batch progress display
pub mod progress;
/// Text and JSON rendering of results
pub mod report;
/// Synthetic grid images with known layout
#[cfg(feature = "synthetic")]
pub mod synthetic;
