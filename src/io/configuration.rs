//! Detection and classification constants, and the runtime configuration built from them

use crate::io::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Gap-based grid detection
/// Side length of the square corner patches used to estimate the background
pub const CORNER_PATCH_SIZE: usize = 5;
/// Brightness margin below the background at which a pixel counts as foreground
pub const FOREGROUND_MARGIN: f64 = 20.0;
/// Foreground density below which a row or column is part of a gap
pub const GAP_DENSITY: f64 = 0.3;
/// Minimum distance between splits, as a fraction of the foreground span
pub const MIN_SPLIT_FRACTION: f64 = 0.05;

// Brute force fallback; bounds only limit the search cost
/// Smallest row or column count tried by the fallback search
pub const FALLBACK_MIN_DIVISIONS: usize = 2;
/// Largest row or column count tried by the fallback search
pub const FALLBACK_MAX_DIVISIONS: usize = 7;
/// Largest total cell count tried by the fallback search
pub const FALLBACK_MAX_CELLS: usize = 50;
/// Minimum cell width and height, in pixels, for a fallback candidate
pub const FALLBACK_MIN_CELL_SIZE: u32 = 20;
/// Fraction of each cell side ignored when scoring a candidate
pub const FALLBACK_SAMPLE_MARGIN: f64 = 0.15;
/// Mean brightness above which a sampled cell is treated as background
pub const FALLBACK_MAX_BRIGHTNESS: f64 = 200.0;
/// Distance to the median color within which cells count as similar
pub const FALLBACK_SIMILARITY_DISTANCE: f64 = 80.0;
/// Minimum fraction of similar cells for a candidate to score at all
pub const FALLBACK_MIN_SIMILARITY: f64 = 0.7;
/// Mean channel deviation below which a candidate is considered uninformative
pub const FALLBACK_UNIFORM_STD: f64 = 5.0;
/// Score multiplier for uninformative candidates
pub const FALLBACK_UNIFORM_PENALTY: f64 = 0.6;

// Color sampling
/// Fraction of each cell side excluded from the color sample
pub const SAMPLE_MARGIN: f64 = 0.2;
/// Minimum sample window side in pixels
pub const SAMPLE_MIN_SIZE: u32 = 5;

// Outlier classification
/// Numerator of the isolation threshold (`ISOLATION_DISTANCE / sensitivity`)
pub const ISOLATION_DISTANCE: f64 = 10.0;
/// Minimum spread for a scale estimate to be trusted
pub const MIN_SPREAD: f64 = 0.1;
/// Z-score above which a cell is an outlier
pub const Z_SCORE_THRESHOLD: f64 = 1.5;
/// Consistency constant of the modified z-score
pub const MAD_SCALE: f64 = 0.6745;
/// Modified z-score above which a cell is an outlier
pub const MODIFIED_Z_THRESHOLD: f64 = 2.5;
/// Maximum reassignment rounds of the two-cluster fallback
pub const CLUSTER_ROUNDS: usize = 10;

// Presentation and acquisition defaults
/// Default classifier sensitivity
pub const DEFAULT_SENSITIVITY: f64 = 1.5;
/// Maximum number of cells listed in debug output
pub const DEFAULT_DEBUG_LIMIT: usize = 20;
/// Smallest accepted capture scale factor
pub const MIN_CAPTURE_SCALE: f64 = 0.5;
/// Largest accepted capture scale factor
pub const MAX_CAPTURE_SCALE: f64 = 3.0;
/// Capture regions must be larger than this on both axes, in logical pixels
pub const MIN_CAPTURE_EXTENT: u32 = 10;
/// File extensions picked up when the target is a directory
pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "bmp", "gif", "webp", "tif", "tiff"];

/// Gap-based detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Corner patch side used for background estimation
    pub corner_patch_size: usize,
    /// Foreground threshold offset below the background brightness
    pub foreground_margin: f64,
    /// Density below which a line is a gap
    pub gap_density: f64,
    /// Minimum split spacing as a fraction of the foreground span
    pub min_split_fraction: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            corner_patch_size: CORNER_PATCH_SIZE,
            foreground_margin: FOREGROUND_MARGIN,
            gap_density: GAP_DENSITY,
            min_split_fraction: MIN_SPLIT_FRACTION,
        }
    }
}

/// Scored brute-force fallback parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Smallest row/column count
    pub min_divisions: usize,
    /// Largest row/column count
    pub max_divisions: usize,
    /// Largest `rows * cols`
    pub max_cells: usize,
    /// Minimum cell side in pixels
    pub min_cell_size: u32,
    /// Per-side sample margin as a fraction of the cell side
    pub sample_margin: f64,
    /// Brightness above which a cell is background
    pub max_brightness: f64,
    /// Similarity radius around the median color
    pub similarity_distance: f64,
    /// Minimum similar fraction
    pub min_similarity: f64,
    /// Mean channel deviation below which cells are too uniform
    pub uniform_std: f64,
    /// Multiplier applied to uniform candidates
    pub uniform_penalty: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            min_divisions: FALLBACK_MIN_DIVISIONS,
            max_divisions: FALLBACK_MAX_DIVISIONS,
            max_cells: FALLBACK_MAX_CELLS,
            min_cell_size: FALLBACK_MIN_CELL_SIZE,
            sample_margin: FALLBACK_SAMPLE_MARGIN,
            max_brightness: FALLBACK_MAX_BRIGHTNESS,
            similarity_distance: FALLBACK_SIMILARITY_DISTANCE,
            min_similarity: FALLBACK_MIN_SIMILARITY,
            uniform_std: FALLBACK_UNIFORM_STD,
            uniform_penalty: FALLBACK_UNIFORM_PENALTY,
        }
    }
}

/// Cell color sampling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Per-side margin as a fraction of the cell side
    pub margin: f64,
    /// Minimum window side in pixels
    pub min_size: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            margin: SAMPLE_MARGIN,
            min_size: SAMPLE_MIN_SIZE,
        }
    }
}

/// Outlier cascade parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Isolation threshold numerator
    pub isolation_distance: f64,
    /// Minimum standard deviation / MAD for the statistical tests
    pub min_spread: f64,
    /// Z-score cutoff
    pub z_score_threshold: f64,
    /// Modified z-score consistency constant
    pub mad_scale: f64,
    /// Modified z-score cutoff
    pub modified_z_threshold: f64,
    /// Two-cluster iteration limit
    pub cluster_rounds: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            isolation_distance: ISOLATION_DISTANCE,
            min_spread: MIN_SPREAD,
            z_score_threshold: Z_SCORE_THRESHOLD,
            mad_scale: MAD_SCALE,
            modified_z_threshold: MODIFIED_Z_THRESHOLD,
            cluster_rounds: CLUSTER_ROUNDS,
        }
    }
}

impl ClassifierConfig {
    /// Distance below which colors are indistinguishable at `sensitivity`
    pub fn min_threshold(&self, sensitivity: f64) -> f64 {
        self.isolation_distance / sensitivity
    }
}

/// Complete analysis configuration
///
/// Every field defaults to the module constants, so a JSON file only needs
/// to name the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Gap-based detection
    pub detector: DetectorConfig,
    /// Brute-force fallback detection
    pub fallback: FallbackConfig,
    /// Cell color sampling
    pub sampler: SamplerConfig,
    /// Outlier classification
    pub classifier: ClassifierConfig,
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON for
    /// this structure
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::FileSystem {
            path: path.to_path_buf(),
            operation: "read configuration",
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| AnalysisError::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the configuration as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| AnalysisError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| AnalysisError::FileSystem {
            path: path.to_path_buf(),
            operation: "write configuration",
            source: e,
        })
    }
}
