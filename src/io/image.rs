//! Image acquisition: decoding files and cropping scaled capture regions

use crate::io::configuration::{MAX_CAPTURE_SCALE, MIN_CAPTURE_EXTENT, MIN_CAPTURE_SCALE};
use crate::io::error::{AnalysisError, Result, invalid_parameter};
use crate::spatial::Rect;
use image::RgbImage;
use image::imageops::crop_imm;
use std::path::Path;
use tracing::debug;

/// Decode an image file of any supported format into 8-bit RGB
///
/// Alpha is discarded and palette or grayscale images are expanded.
///
/// # Errors
///
/// Returns [`AnalysisError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|source| AnalysisError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "image loaded");
    Ok(image.to_rgb8())
}

fn validate_scale(parameter: &'static str, scale: f64) -> Result<()> {
    if (MIN_CAPTURE_SCALE..=MAX_CAPTURE_SCALE).contains(&scale) {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &scale,
            &format!("must be between {MIN_CAPTURE_SCALE} and {MAX_CAPTURE_SCALE}"),
        ))
    }
}

/// Map a region in logical coordinates to pixels
///
/// x and width are multiplied by `scale_x`, y and height by `scale_y`, each
/// truncated toward zero.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidParameter`] if either scale is outside
/// the supported range or the region is not larger than the minimum
/// capture extent on both axes
pub fn scale_region(region: Rect, scale_x: f64, scale_y: f64) -> Result<Rect> {
    validate_scale("scale_x", scale_x)?;
    validate_scale("scale_y", scale_y)?;

    if region.width <= MIN_CAPTURE_EXTENT || region.height <= MIN_CAPTURE_EXTENT {
        return Err(invalid_parameter(
            "region",
            &format!("{}x{}", region.width, region.height),
            &format!("width and height must exceed {MIN_CAPTURE_EXTENT} pixels"),
        ));
    }

    let scale = |value: u32, factor: f64| (f64::from(value) * factor) as u32;
    Ok(Rect::new(
        scale(region.x, scale_x),
        scale(region.y, scale_y),
        scale(region.width, scale_x),
        scale(region.height, scale_y),
    ))
}

/// Crop a logical capture region out of a full screen image
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidParameter`] if the region is too small,
/// a scale is out of range, or the scaled region does not fit in the image
pub fn crop_scaled(image: &RgbImage, region: Rect, scale_x: f64, scale_y: f64) -> Result<RgbImage> {
    let pixels = scale_region(region, scale_x, scale_y)?;

    let fits = u64::from(pixels.x) + u64::from(pixels.width) <= u64::from(image.width())
        && u64::from(pixels.y) + u64::from(pixels.height) <= u64::from(image.height());
    if !fits || pixels.is_empty() {
        return Err(invalid_parameter(
            "region",
            &format!(
                "{},{},{},{}",
                pixels.x, pixels.y, pixels.width, pixels.height
            ),
            &format!(
                "scaled region must lie within the {}x{} image",
                image.width(),
                image.height()
            ),
        ));
    }

    Ok(crop_imm(image, pixels.x, pixels.y, pixels.width, pixels.height).to_image())
}
