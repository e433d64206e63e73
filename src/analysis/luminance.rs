//! Grayscale conversion, background estimation and foreground masking

use crate::math::statistics::{mean, median};
use image::RgbImage;
use ndarray::{Array2, ArrayView2, Axis, Slice};
use std::ops::Range;

/// Grayscale image as `(height, width)` channel averages
pub fn grayscale(image: &RgbImage) -> Array2<f64> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut gray = Array2::zeros((height, width));

    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        if let Some(value) = gray.get_mut((y as usize, x as usize)) {
            *value = (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0;
        }
    }

    gray
}

/// Background brightness: median of the mean brightness of the four
/// `patch` x `patch` corner squares
///
/// Patches are clipped to the image, so tiny images use whatever pixels exist.
pub fn background_level(gray: &ArrayView2<'_, f64>, patch: usize) -> Option<f64> {
    let (height, width) = gray.dim();
    if height == 0 || width == 0 {
        return None;
    }

    let ph = patch.clamp(1, height);
    let pw = patch.clamp(1, width);
    let corners = [
        sub_view(gray, 0..ph, 0..pw),
        sub_view(gray, 0..ph, width - pw..width),
        sub_view(gray, height - ph..height, 0..pw),
        sub_view(gray, height - ph..height, width - pw..width),
    ];

    let levels: Vec<f64> = corners
        .iter()
        .filter_map(|corner| corner.mean())
        .collect();
    median(&levels)
}

/// Rectangular window of a 2D view with `rows` and `cols` clamped to its shape
///
/// Reversed ranges give an empty window.
pub fn sub_view<'a, T>(
    view: &ArrayView2<'a, T>,
    rows: Range<usize>,
    cols: Range<usize>,
) -> ArrayView2<'a, T> {
    let (height, width) = view.dim();
    let row_start = rows.start.min(height);
    let col_start = cols.start.min(width);
    let rows = row_start..rows.end.clamp(row_start, height);
    let cols = col_start..cols.end.clamp(col_start, width);
    view.clone()
        .slice_axis_move(Axis(0), Slice::from(rows))
        .slice_axis_move(Axis(1), Slice::from(cols))
}

/// Pixels darker than `threshold`
pub fn foreground_mask(gray: &ArrayView2<'_, f64>, threshold: f64) -> Array2<bool> {
    gray.mapv(|value| value < threshold)
}

/// Half-open extent `[start, end)` of the `true` entries, `None` if all false
pub fn occupied_extent(occupied: &[bool]) -> Option<(usize, usize)> {
    let start = occupied.iter().position(|&o| o)?;
    let end = occupied.iter().rposition(|&o| o)? + 1;
    Some((start, end))
}

/// Bounding box of the foreground as `((row_start, row_end), (col_start, col_end))`
pub fn foreground_bounds(mask: &ArrayView2<'_, bool>) -> Option<((usize, usize), (usize, usize))> {
    let rows: Vec<bool> = mask
        .axis_iter(Axis(0))
        .map(|line| line.iter().any(|&v| v))
        .collect();
    let cols: Vec<bool> = mask
        .axis_iter(Axis(1))
        .map(|line| line.iter().any(|&v| v))
        .collect();

    Some((occupied_extent(&rows)?, occupied_extent(&cols)?))
}

/// Fraction of foreground pixels along each line of `axis`
///
/// `Axis(0)` yields one density per row, `Axis(1)` one per column.
pub fn line_density(mask: &ArrayView2<'_, bool>, axis: Axis) -> Vec<f64> {
    mask.axis_iter(axis)
        .map(|line| {
            let values: Vec<f64> = line.iter().map(|&v| if v { 1.0 } else { 0.0 }).collect();
            mean(&values).unwrap_or(0.0)
        })
        .collect()
}
