//! Grid detection from blank gutters, with a scored brute-force fallback
//!
//! The primary strategy thresholds the image against its corner background,
//! bounds the foreground and turns every closed run of sparse rows/columns
//! into a split line. When that yields no usable structure the
//! [`GridSearch`] tries every small uniform partition and keeps the best.

use crate::algorithm::search::GridSearch;
use crate::analysis::luminance::{
    background_level, foreground_bounds, foreground_mask, grayscale, line_density, sub_view,
};
use crate::io::configuration::{AnalysisConfig, DetectorConfig, FallbackConfig};
use crate::io::error::{AnalysisError, Result};
use crate::spatial::Grid;
use image::RgbImage;
use ndarray::Axis;
use tracing::{debug, trace};

/// Detects the cell layout of a grid image
#[derive(Debug, Clone, Default)]
pub struct GridDetector {
    detector: DetectorConfig,
    fallback: FallbackConfig,
}

impl GridDetector {
    /// Create a detector with explicit parameters
    pub const fn new(detector: DetectorConfig, fallback: FallbackConfig) -> Self {
        Self { detector, fallback }
    }

    /// Create a detector from the relevant sections of a full configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.detector.clone(), config.fallback.clone())
    }

    /// Infer rows, columns and cell rectangles
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoGridDetected`] when neither gap detection
    /// nor the brute-force search produces a grid
    pub fn detect(&self, image: &RgbImage) -> Result<Grid> {
        if let Some(grid) = self.detect_by_gaps(image) {
            debug!(rows = grid.rows(), cols = grid.cols(), "grid found from gaps");
            return Ok(grid);
        }

        debug!("gap detection found no structure, searching uniform partitions");
        GridSearch::new(&self.fallback)
            .best(image)
            .map(|candidate| {
                debug!(
                    rows = candidate.grid.rows(),
                    cols = candidate.grid.cols(),
                    score = candidate.score,
                    "grid found by partition search"
                );
                candidate.grid
            })
            .ok_or(AnalysisError::NoGridDetected {
                width: image.width(),
                height: image.height(),
            })
    }

    /// Gap-based segmentation alone, `None` when it finds no grid
    pub fn detect_by_gaps(&self, image: &RgbImage) -> Option<Grid> {
        let gray = grayscale(image);
        let background = background_level(&gray.view(), self.detector.corner_patch_size)?;
        let threshold = background - self.detector.foreground_margin;
        let mask = foreground_mask(&gray.view(), threshold);

        let Some(((row_start, row_end), (col_start, col_end))) = foreground_bounds(&mask.view())
        else {
            trace!(background, "no foreground below threshold");
            return None;
        };

        let region = sub_view(&mask.view(), row_start..row_end, col_start..col_end);
        let row_gaps = self.gap_lines(&line_density(&region, Axis(0)));
        let col_gaps = self.gap_lines(&line_density(&region, Axis(1)));

        let row_splits = to_pixel_coords(&split_points(
            &row_gaps,
            row_start,
            row_end,
            self.detector.min_split_fraction,
        ))?;
        let col_splits = to_pixel_coords(&split_points(
            &col_gaps,
            col_start,
            col_end,
            self.detector.min_split_fraction,
        ))?;
        trace!(?row_splits, ?col_splits, "split lines");

        Grid::from_splits(&row_splits, &col_splits)
    }

    fn gap_lines(&self, density: &[f64]) -> Vec<bool> {
        density
            .iter()
            .map(|&d| d < self.detector.gap_density)
            .collect()
    }
}

/// Turn a gap profile into split coordinates
///
/// `gaps` is indexed relative to `start`. Every run of gap lines that is
/// closed by a non-gap line contributes its midpoint, provided it lies more
/// than `min_fraction` of the span past the previous split. `start` and `end`
/// always bound the result, and a run still open at the end contributes nothing.
pub fn split_points(gaps: &[bool], start: usize, end: usize, min_fraction: f64) -> Vec<usize> {
    let min_spacing = end.saturating_sub(start) as f64 * min_fraction;
    let mut splits = vec![start];
    let mut open_run: Option<usize> = None;

    for (i, &is_gap) in gaps.iter().enumerate() {
        match (is_gap, open_run) {
            (true, None) => open_run = Some(i),
            (false, Some(run_start)) => {
                open_run = None;
                let midpoint = start + (run_start + i) / 2;
                let previous = splits.last().copied().unwrap_or(start);
                if midpoint as f64 - previous as f64 > min_spacing {
                    splits.push(midpoint);
                }
            }
            _ => {}
        }
    }

    splits.push(end);
    splits
}

fn to_pixel_coords(splits: &[usize]) -> Option<Vec<u32>> {
    splits.iter().map(|&v| u32::try_from(v).ok()).collect()
}
