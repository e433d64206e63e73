//! Brute-force search over small uniform grid partitions
//!
//! Used when the image has no blank gutters to split on. Every candidate
//! `rows x cols` partition is scored by how consistent and how non-background
//! its cell colors look, and the best-scoring one wins.

use crate::analysis::sampling::rect_mean;
use crate::io::configuration::FallbackConfig;
use crate::math::color::{Color, median_color};
use crate::math::statistics::{mean, std_dev};
use crate::spatial::Grid;
use image::RgbImage;
use tracing::trace;

/// A scored partition
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Partition geometry
    pub grid: Grid,
    /// Score in `(0, 1]`
    pub score: f64,
}

/// Scores uniform partitions of an image
pub struct GridSearch<'a> {
    config: &'a FallbackConfig,
}

impl<'a> GridSearch<'a> {
    /// Create a search bound to the given parameters
    pub const fn new(config: &'a FallbackConfig) -> Self {
        Self { config }
    }

    /// `(rows, cols)` pairs in search order: ascending rows, then columns
    pub fn dimensions(&self) -> Vec<(usize, usize)> {
        let range = self.config.min_divisions..=self.config.max_divisions;
        range
            .clone()
            .flat_map(|rows| range.clone().map(move |cols| (rows, cols)))
            .filter(|&(rows, cols)| rows * cols <= self.config.max_cells)
            .collect()
    }

    /// Highest-scoring partition; the first one found wins ties
    ///
    /// Returns `None` if no candidate scores above zero.
    pub fn best(&self, image: &RgbImage) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (rows, cols) in self.dimensions() {
            let Some(grid) = self.partition(image, rows, cols) else {
                continue;
            };
            let score = self.score(image, &grid);
            trace!(rows, cols, score, "partition candidate");

            if score > best.as_ref().map_or(0.0, |b| b.score) {
                best = Some(Candidate { grid, score });
            }
        }

        best
    }

    /// Uniform partition, `None` if cells would be smaller than the minimum size
    pub fn partition(&self, image: &RgbImage, rows: usize, cols: usize) -> Option<Grid> {
        let cell_height = image.height() / u32::try_from(rows).ok().filter(|&r| r > 0)?;
        let cell_width = image.width() / u32::try_from(cols).ok().filter(|&c| c > 0)?;
        if cell_height < self.config.min_cell_size || cell_width < self.config.min_cell_size {
            return None;
        }
        Grid::uniform(image.width(), image.height(), rows, cols)
    }

    /// Score a partition in `[0, 1]`
    ///
    /// Zero if any cell is empty or brighter than the background limit, or if
    /// too few cells sit near the median color. Candidates whose cells are
    /// nearly identical are scaled down because they carry no evidence that
    /// the partition matches real cell boundaries.
    pub fn score(&self, image: &RgbImage, grid: &Grid) -> f64 {
        let mut colors = Vec::with_capacity(grid.len());

        for rect in grid.cells() {
            let margin_x = (f64::from(rect.width) * self.config.sample_margin) as u32;
            let margin_y = (f64::from(rect.height) * self.config.sample_margin) as u32;
            let Some(color) = rect_mean(image, &rect.inset(margin_x, margin_y)) else {
                return 0.0;
            };
            if color.brightness() > self.config.max_brightness {
                return 0.0;
            }
            colors.push(color);
        }

        if colors.len() != grid.rows() * grid.cols() {
            return 0.0;
        }

        let Some(similarity) = self.similarity(&colors) else {
            return 0.0;
        };
        if similarity < self.config.min_similarity {
            return 0.0;
        }

        if mean_channel_std(&colors) < self.config.uniform_std {
            similarity * self.config.uniform_penalty
        } else {
            similarity
        }
    }

    fn similarity(&self, colors: &[Color]) -> Option<f64> {
        let center = median_color(colors)?;
        let close = colors
            .iter()
            .filter(|c| c.distance(center) < self.config.similarity_distance)
            .count();
        Some(close as f64 / colors.len() as f64)
    }
}

/// Mean of the per-channel population standard deviations
pub fn mean_channel_std(colors: &[Color]) -> f64 {
    let deviations: Vec<f64> = (0..3)
        .filter_map(|channel| {
            let values: Vec<f64> = colors
                .iter()
                .filter_map(|c| c.channels().get(channel).copied())
                .collect();
            std_dev(&values)
        })
        .collect();
    mean(&deviations).unwrap_or(0.0)
}
