//! Grid geometry inference and odd-color cell detection
//!
//! Given a screenshot of a rectangular grid of colored cells, the crate
//! detects the grid layout, samples a representative color per cell and
//! reports the cells whose color differs from the rest.

#![forbid(unsafe_code)]

/// Outlier classification, partition search and the end-to-end pipeline
pub mod algorithm;
/// Grid detection and per-cell color sampling
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Color arithmetic and robust statistics
pub mod math;
/// Grid geometry and cell indexing
pub mod spatial;

pub use algorithm::executor::{AnalysisResult, Analyzer, CellReport, analyze};
pub use io::configuration::AnalysisConfig;
pub use io::error::{AnalysisError, Result};
