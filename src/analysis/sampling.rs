//! Representative cell colors from the central part of each cell

use crate::io::configuration::SamplerConfig;
use crate::math::color::Color;
use crate::spatial::{Grid, Rect};
use image::RgbImage;

/// Mean color of the pixels in `[x1, x2) x [y1, y2)`, clamped to the image
///
/// Returns `None` when the clamped window holds no pixels.
pub fn region_mean(image: &RgbImage, x1: i64, y1: i64, x2: i64, y2: i64) -> Option<Color> {
    let x_start = x1.max(0);
    let y_start = y1.max(0);
    let x_end = x2.min(i64::from(image.width()));
    let y_end = y2.min(i64::from(image.height()));
    if x_start >= x_end || y_start >= y_end {
        return None;
    }

    let mut sum = [0.0_f64; 3];
    let mut count = 0_u64;
    for y in y_start..y_end {
        for x in x_start..x_end {
            let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) else {
                continue;
            };
            if let Some(pixel) = image.get_pixel_checked(px, py) {
                for (total, &channel) in sum.iter_mut().zip(pixel.0.iter()) {
                    *total += f64::from(channel);
                }
                count += 1;
            }
        }
    }

    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(Color::new(sum[0] / n, sum[1] / n, sum[2] / n))
}

/// Mean color of a rectangle, `None` if it lies outside the image
pub fn rect_mean(image: &RgbImage, rect: &Rect) -> Option<Color> {
    region_mean(
        image,
        i64::from(rect.x),
        i64::from(rect.y),
        i64::from(rect.right()),
        i64::from(rect.bottom()),
    )
}

/// Samples one color per cell from a centered window
#[derive(Debug, Clone, Default)]
pub struct ColorSampler {
    config: SamplerConfig,
}

impl ColorSampler {
    /// Create a sampler with the given window parameters
    pub const fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Sample window for `rect` before clamping, as `(x1, y1, x2, y2)`
    ///
    /// The window is centered on the rectangle and spans the rectangle minus
    /// the configured margin on each side, but never less than the minimum
    /// size. Odd sizes lose one pixel because the window extends `size / 2`
    /// to either side of the center.
    pub fn window(&self, rect: &Rect) -> (i64, i64, i64, i64) {
        let margin_x = (f64::from(rect.width) * self.config.margin) as u32;
        let margin_y = (f64::from(rect.height) * self.config.margin) as u32;
        let (cx, cy) = rect.center();

        let sample_w = rect
            .width
            .saturating_sub(margin_x.saturating_mul(2))
            .max(self.config.min_size);
        let sample_h = rect
            .height
            .saturating_sub(margin_y.saturating_mul(2))
            .max(self.config.min_size);

        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let (half_w, half_h) = (i64::from(sample_w / 2), i64::from(sample_h / 2));
        (cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    /// Representative color of one cell
    ///
    /// Never fails: a window with no pixels inside the image yields
    /// [`Color::NEUTRAL_GRAY`].
    pub fn sample(&self, image: &RgbImage, rect: &Rect) -> Color {
        let (x1, y1, x2, y2) = self.window(rect);
        region_mean(image, x1, y1, x2, y2).unwrap_or(Color::NEUTRAL_GRAY)
    }

    /// One color per grid cell, in row-major order
    pub fn sample_grid(&self, image: &RgbImage, grid: &Grid) -> Vec<Color> {
        grid.cells()
            .iter()
            .map(|rect| self.sample(image, rect))
            .collect()
    }
}
