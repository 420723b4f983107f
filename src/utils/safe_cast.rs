//! Checked conversions between OpenCV's `i32` geometry and Rust indices

use crate::{Error, Result};

/// Convert a non-negative OpenCV dimension to usize
///
/// # Errors
///
/// Returns an error if the dimension is negative
pub fn dim_to_usize(value: i32) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::InvalidInput(format!("Negative dimension {value}")))
}

/// Map a heatmap index to image pixel space, truncating like integer division
///
/// Computes `floor(image_extent * coord / heatmap_extent)` without going
/// through floating point.
///
/// # Errors
///
/// Returns an error if `heatmap_extent` is zero, `image_extent` is negative,
/// or the result does not fit in i32
pub fn rescale_coordinate(coord: usize, heatmap_extent: usize, image_extent: i32) -> Result<i32> {
    if heatmap_extent == 0 {
        return Err(Error::InvalidInput("Heatmap extent must be non-zero".to_string()));
    }
    if image_extent < 0 {
        return Err(Error::InvalidInput(format!("Negative image extent {image_extent}")));
    }
    let scaled = u128::from(image_extent.unsigned_abs()) * coord as u128 / heatmap_extent as u128;
    i32::try_from(scaled).map_err(|_| Error::InvalidInput(format!("Scaled coordinate {scaled} overflows i32")))
}
