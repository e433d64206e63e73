//! Full analysis pipeline: detect the grid, sample each cell, classify outliers

use crate::algorithm::cascade::OutlierClassifier;
use crate::analysis::detection::GridDetector;
use crate::analysis::sampling::ColorSampler;
use crate::io::configuration::AnalysisConfig;
use crate::io::error::Result;
use crate::math::color::Color;
use crate::spatial::{CellPosition, Grid};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Color of one cell at its one-based position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellReport {
    /// Row, starting at 1
    pub row: usize,
    /// Column, starting at 1
    pub col: usize,
    /// Sampled average color
    pub color: Color,
}

impl CellReport {
    /// One-based position of the cell
    pub const fn position(&self) -> CellPosition {
        CellPosition {
            row: self.row,
            col: self.col,
        }
    }
}

/// Result of analyzing one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Detected `(rows, cols)`
    pub grid: (usize, usize),
    /// Cells whose color stands out, in row-major order
    pub outliers: Vec<CellReport>,
    /// Every sampled cell in row-major order, present in debug mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_colors: Option<Vec<CellReport>>,
}

impl AnalysisResult {
    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.grid.0
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.grid.1
    }

    /// Test whether the cell at a one-based position was flagged
    pub fn is_outlier(&self, position: CellPosition) -> bool {
        self.outliers.iter().any(|cell| cell.position() == position)
    }
}

/// Configured analysis pipeline
///
/// Holds no per-image state; one analyzer can serve any number of images,
/// including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    detector: GridDetector,
    sampler: ColorSampler,
    classifier: OutlierClassifier,
}

impl Analyzer {
    /// Build the pipeline from a configuration
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            detector: GridDetector::from_config(config),
            sampler: ColorSampler::new(config.sampler.clone()),
            classifier: OutlierClassifier::new(config.classifier.clone()),
        }
    }

    /// Detect the grid and report the cells whose color stands out
    ///
    /// `sensitivity` is used as given; values around `0.5..=3.0` are typical
    /// and larger values flag smaller differences.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnalysisError::NoGridDetected`] when no grid can be found
    pub fn analyze(
        &self,
        image: &RgbImage,
        sensitivity: f64,
        include_all_colors: bool,
    ) -> Result<AnalysisResult> {
        let grid = self.detector.detect(image)?;
        let colors = self.sampler.sample_grid(image, &grid);
        let verdict = self.classifier.verdict(&colors, sensitivity);

        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            outliers = verdict.outliers.count(),
            stage = ?verdict.stage,
            "analysis complete"
        );

        let outliers = verdict
            .outliers
            .iter()
            .filter_map(|index| report(&grid, &colors, index))
            .collect();
        let all_colors = include_all_colors.then(|| {
            (0..colors.len())
                .filter_map(|index| report(&grid, &colors, index))
                .collect()
        });

        Ok(AnalysisResult {
            grid: (grid.rows(), grid.cols()),
            outliers,
            all_colors,
        })
    }
}

fn report(grid: &Grid, colors: &[Color], index: usize) -> Option<CellReport> {
    let position = grid.position(index)?;
    let color = colors.get(index).copied()?;
    Some(CellReport {
        row: position.row,
        col: position.col,
        color,
    })
}

/// Analyze an image with the default configuration
///
/// # Errors
///
/// Returns [`crate::AnalysisError::NoGridDetected`] when no grid can be found
pub fn analyze(
    image: &RgbImage,
    sensitivity: f64,
    include_all_colors: bool,
) -> Result<AnalysisResult> {
    Analyzer::default().analyze(image, sensitivity, include_all_colors)
}
