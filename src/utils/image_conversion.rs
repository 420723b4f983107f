//! Views of OpenCV DNN blobs as ndarray tensors.

use crate::utils::safe_cast::dim_to_usize;
use crate::{Error, Result};
use ndarray::ArrayView4;
use opencv::core::{Mat, CV_32F};
use opencv::prelude::*;

/// Borrow a 4-D `CV_32F` blob (`[N, C, H, W]`) as an ndarray view
///
/// The view shares the Mat's buffer, so no pixel data is copied.
///
/// # Errors
/// * Returns error if the blob is not `CV_32F`
/// * Returns error if the blob is not 4-dimensional
/// * Returns error if the blob data is not continuous
pub fn blob_as_array4(blob: &Mat) -> Result<ArrayView4<'_, f32>> {
    if blob.typ() != CV_32F {
        return Err(Error::ModelOutputError(format!(
            "Expected CV_32F blob, got type {}",
            blob.typ()
        )));
    }

    let size = blob.mat_size();
    if size.len() != 4 {
        return Err(Error::ModelOutputError(format!(
            "Expected 4-D blob, got {} dimensions",
            size.len()
        )));
    }

    let shape = (
        dim_to_usize(size[0])?,
        dim_to_usize(size[1])?,
        dim_to_usize(size[2])?,
        dim_to_usize(size[3])?,
    );

    let data = blob.data_typed::<f32>()?;
    ArrayView4::from_shape(shape, data)
        .map_err(|e| Error::ModelOutputError(format!("Failed to view blob as array: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    fn blob(dims: &[i32]) -> Mat {
        Mat::new_nd_with_default(dims, CV_32F, Scalar::all(0.0)).unwrap()
    }

    #[test]
    fn test_blob_shape_and_values() {
        let mut mat = blob(&[1, 3, 4, 5]);
        *mat.at_nd_mut::<f32>(&[0, 2, 1, 4]).unwrap() = 0.75;

        let view = blob_as_array4(&mat).unwrap();
        assert_eq!(view.shape(), &[1, 3, 4, 5]);
        assert_eq!(view[[0, 2, 1, 4]], 0.75);
        assert_eq!(view[[0, 0, 0, 0]], 0.0);
    }

    #[test]
    fn test_rejects_wrong_type() {
        let mat = Mat::new_rows_cols_with_default(4, 4, CV_8UC3, Scalar::all(0.0)).unwrap();
        assert!(matches!(blob_as_array4(&mat), Err(Error::ModelOutputError(_))));
    }

    #[test]
    fn test_rejects_wrong_rank() {
        let mat = blob(&[2, 3, 4]);
        match blob_as_array4(&mat) {
            Err(Error::ModelOutputError(msg)) => assert!(msg.contains("4-D")),
            other => panic!("Expected ModelOutputError, got {other:?}"),
        }
    }
}
