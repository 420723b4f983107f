//! End-to-end tests from synthetic network output to rendered images


use body_pose_estimation::{
    keypoints::{extract_keypoints, heatmap_peaks},
    render::{image_with_key_points, image_with_skeleton},
    utils::image_conversion::blob_as_array4,
    PoseModel, Result,
};
use opencv::core::{Mat, Point, Scalar, Size, CV_32F};
use opencv::prelude::*;
use test_helpers::{create_test_image, pixel, synthetic_heatmaps};

/// Heatmap output of the COCO network is 46x46 for a 368x368 input
const HEATMAP_SIZE: usize = 46;
const COCO_CHANNELS: usize = 57;
const MPI_CHANNELS: usize = 44;

#[test]
fn test_coco_keypoints_from_synthetic_heatmaps() -> Result<()> {
    // Nose, neck and right shoulder present, everything else below threshold
    let maps = synthetic_heatmaps(
        COCO_CHANNELS,
        HEATMAP_SIZE,
        &[(0, 5, 20, 0.9), (1, 12, 20, 0.8), (2, 12, 14, 0.35), (3, 20, 12, 0.09), (4, 22, 10, 0.1)],
    );

    let points = extract_keypoints(maps.view(), PoseModel::Coco.num_points(), Size::new(460, 920), 0.1)?;

    assert_eq!(points.len(), 18);
    // x = 460 * 20 / 46 = 200, y = 920 * 5 / 46 = 100
    assert_eq!(points[0], Some(Point::new(200, 100)));
    assert_eq!(points[1], Some(Point::new(200, 240)));
    assert_eq!(points[2], Some(Point::new(140, 240)));
    assert_eq!(points[3], None);
    // 0.1f32 is slightly above the 0.1 threshold once widened
    assert_eq!(points[4], Some(Point::new(100, 440)));
    assert!(points[5..].iter().all(Option::is_none));
    Ok(())
}

#[test]
fn test_mpi_keypoints_from_synthetic_heatmaps() -> Result<()> {
    let maps = synthetic_heatmaps(MPI_CHANNELS, HEATMAP_SIZE, &[(0, 0, 0, 0.5), (14, 45, 45, 0.5)]);

    let points = extract_keypoints(maps.view(), PoseModel::Mpi.num_points(), Size::new(368, 368), 0.1)?;

    assert_eq!(points.len(), 15);
    assert_eq!(points[0], Some(Point::new(0, 0)));
    assert_eq!(points[14], Some(Point::new(360, 360)));
    Ok(())
}

#[test]
fn test_peaks_report_confidence() -> Result<()> {
    let maps = synthetic_heatmaps(COCO_CHANNELS, HEATMAP_SIZE, &[(7, 30, 10, 0.42)]);
    let peaks = heatmap_peaks(maps.view(), 18, Size::new(46, 46))?;
    assert_eq!(peaks[7].location, Point::new(10, 30));
    assert!((peaks[7].confidence - 0.42).abs() < f32::EPSILON);
    Ok(())
}

#[test]
fn test_blob_mat_through_extraction() -> Result<()> {
    let mut blob = Mat::new_nd_with_default(&[1, 19, 46, 46], CV_32F, Scalar::all(0.0))?;
    *blob.at_nd_mut::<f32>(&[0, 1, 23, 23])? = 0.7;

    let view = blob_as_array4(&blob)?;
    let points = extract_keypoints(view, 18, Size::new(920, 460), 0.1)?;

    assert_eq!(points[1], Some(Point::new(460, 230)));
    assert_eq!(points.iter().flatten().count(), 1);
    Ok(())
}

#[test]
fn test_render_coco_skeleton() -> Result<()> {
    let image = create_test_image(200, 200, 0.0)?;
    let mut points = vec![None; 18];
    points[1] = Some(Point::new(100, 40));
    points[8] = Some(Point::new(100, 160));
    // Limb (1, 2) has a missing end and must not be drawn
    points[2] = None;

    let out = image_with_skeleton(&image, &points, PoseModel::Coco.pose_pairs())?;

    // Neck to right hip limb (1, 8)
    assert_eq!(pixel(&out, 100, 100)?, [0, 255, 255]);
    assert_eq!(pixel(&out, 100, 40)?, [0, 0, 255]);
    assert_eq!(pixel(&out, 100, 160)?, [0, 0, 255]);
    assert_eq!(pixel(&out, 30, 40)?, [0, 0, 0]);
    Ok(())
}

#[test]
fn test_render_labelled_points_keeps_source() -> Result<()> {
    let image = create_test_image(100, 100, 50.0)?;
    let points = vec![Some(Point::new(30, 30)), None, Some(Point::new(70, 70))];

    let out = image_with_key_points(&image, &points)?;

    assert_eq!(out.size()?, image.size()?);
    assert_eq!(pixel(&out, 30, 36)?, [0, 255, 255]);
    assert_eq!(pixel(&image, 30, 36)?, [50, 50, 50]);
    Ok(())
}
