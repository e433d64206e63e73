//! Floating point RGB colors and the distance metrics used to compare cells

use crate::math::statistics::{approx_eq, mean, median};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerances used when deciding whether two colors are numerically equal
const RELATIVE_TOLERANCE: f64 = 1e-5;
const ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Average RGB color with channels on the 0-255 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl Color {
    /// Mid gray returned when a sample window contains no pixels
    pub const NEUTRAL_GRAY: Self = Self::new(128.0, 128.0, 128.0);

    /// Create a color from channel values
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array in `[r, g, b]` order
    pub const fn channels(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Mean of the three channels
    pub fn brightness(self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Euclidean distance in RGB space
    pub fn distance(self, other: Self) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        db.mul_add(db, dr.mul_add(dr, dg * dg)).sqrt()
    }

    /// Channel-wise near-equality
    pub fn approx_eq(self, other: Self) -> bool {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .all(|(&a, &b)| approx_eq(a, b, RELATIVE_TOLERANCE, ABSOLUTE_TOLERANCE))
    }

    /// Channels truncated to integers the way summaries display them
    pub fn truncated(self) -> [i64; 3] {
        [self.r as i64, self.g as i64, self.b as i64]
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(f64::from(r), f64::from(g), f64::from(b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.truncated();
        write!(f, "RGB({r}, {g}, {b})")
    }
}

fn channel_values(colors: &[Color], channel: usize) -> Vec<f64> {
    colors
        .iter()
        .filter_map(|c| c.channels().get(channel).copied())
        .collect()
}

fn per_channel(colors: &[Color], reduce: impl Fn(&[f64]) -> Option<f64>) -> Option<Color> {
    let r = reduce(&channel_values(colors, 0))?;
    let g = reduce(&channel_values(colors, 1))?;
    let b = reduce(&channel_values(colors, 2))?;
    Some(Color::new(r, g, b))
}

/// Per-channel median color, `None` for an empty slice
pub fn median_color(colors: &[Color]) -> Option<Color> {
    per_channel(colors, median)
}

/// Per-channel mean color (centroid), `None` for an empty slice
pub fn mean_color(colors: &[Color]) -> Option<Color> {
    per_channel(colors, mean)
}

/// Distance from every color to the per-channel median color
pub fn distances_to_median(colors: &[Color]) -> Vec<f64> {
    median_color(colors).map_or_else(Vec::new, |center| {
        colors.iter().map(|c| c.distance(center)).collect()
    })
}
