//! Utility functions for blob conversion and coordinate transformations.

pub mod image_conversion;
pub mod safe_cast;

use crate::{Error, Result};
use opencv::core::{Point, Scalar};

/// Build an opaque BGR `Scalar` from a `[b, g, r]` triple
#[must_use]
pub fn bgr(color: [f64; 3]) -> Scalar {
    Scalar::new(color[0], color[1], color[2], 0.0)
}

/// Fetch the point at `index`, failing if the index is outside the list
///
/// # Errors
///
/// Returns `InvalidInput` if `index >= keypoints.len()`
pub fn keypoint_at(keypoints: &[Option<Point>], index: usize) -> Result<Option<Point>> {
    keypoints.get(index).copied().ok_or_else(|| {
        Error::InvalidInput(format!(
            "Keypoint index {index} out of range for {} keypoints",
            keypoints.len()
        ))
    })
}
