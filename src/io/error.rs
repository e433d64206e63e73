//! Error types for analysis and for the file-based collaborators around it

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all crate operations
///
/// The analysis core only ever produces [`AnalysisError::NoGridDetected`];
/// the remaining variants belong to image acquisition, configuration and
/// the command-line front end.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Neither gap detection nor the brute-force search found a grid
    #[error("no valid grid detected in {width}x{height} image")]
    NoGridDetected {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },

    /// Failed to load or decode an image file
    #[error("failed to load image '{}': {source}", path.display())]
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying decoding error
        #[source]
        source: image::ImageError,
    },

    /// Parameter validation failed
    #[error("invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    #[error("file system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed or serialized
    #[error("invalid configuration '{}': {source}", path.display())]
    Config {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Analysis result could not be serialized as JSON
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Check whether this is the core "no grid" outcome rather than an I/O
    /// or parameter problem
    pub const fn is_detection_failure(&self) -> bool {
        matches!(self, Self::NoGridDetected { .. })
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
