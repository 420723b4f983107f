//! Overlay detected keypoints and skeletons on images.

use crate::{
    constants::{
        DEFAULT_FONT_SCALE, DEFAULT_LABEL_THICKNESS, DEFAULT_LIMB_THICKNESS, DEFAULT_POINT_RADIUS, JOINT_COLOR,
        LABEL_COLOR, LIMB_COLOR, MARKER_COLOR,
    },
    utils::{bgr, keypoint_at},
    Result,
};
use opencv::{
    core::{Mat, Point, FILLED},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Colours and sizes used when drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Skeleton line colour (BGR)
    pub limb_color: [f64; 3],

    /// Skeleton line thickness
    pub limb_thickness: i32,

    /// Joint circle colour on skeleton images (BGR)
    pub joint_color: [f64; 3],

    /// Marker circle colour on labelled keypoint images (BGR)
    pub marker_color: [f64; 3],

    /// Label text colour (BGR)
    pub label_color: [f64; 3],

    /// Radius of joint and marker circles
    pub point_radius: i32,

    /// Label font scale
    pub font_scale: f64,

    /// Label stroke thickness
    pub label_thickness: i32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            limb_color: LIMB_COLOR,
            limb_thickness: DEFAULT_LIMB_THICKNESS,
            joint_color: JOINT_COLOR,
            marker_color: MARKER_COLOR,
            label_color: LABEL_COLOR,
            point_radius: DEFAULT_POINT_RADIUS,
            font_scale: DEFAULT_FONT_SCALE,
            label_thickness: DEFAULT_LABEL_THICKNESS,
        }
    }
}

/// Draw limbs between connected keypoints and a dot on every keypoint
///
/// The input image is left untouched; a copy is returned.
///
/// # Errors
///
/// Returns an error if a pair refers to an index outside `keypoints`, or
/// if OpenCV drawing fails
pub fn image_with_skeleton(image: &Mat, keypoints: &[Option<Point>], pairs: &[(usize, usize)]) -> Result<Mat> {
    image_with_skeleton_styled(image, keypoints, pairs, &RenderStyle::default())
}

/// [`image_with_skeleton`] with an explicit style
///
/// # Errors
///
/// Same conditions as [`image_with_skeleton`]
pub fn image_with_skeleton_styled(
    image: &Mat,
    keypoints: &[Option<Point>],
    pairs: &[(usize, usize)],
    style: &RenderStyle,
) -> Result<Mat> {
    let mut canvas = image.try_clone()?;

    for &(a, b) in pairs {
        if let (Some(from), Some(to)) = (keypoint_at(keypoints, a)?, keypoint_at(keypoints, b)?) {
            imgproc::line(
                &mut canvas,
                from,
                to,
                bgr(style.limb_color),
                style.limb_thickness,
                LINE_8,
                0,
            )?;
        }
    }

    for point in keypoints.iter().flatten() {
        imgproc::circle(
            &mut canvas,
            *point,
            style.point_radius,
            bgr(style.joint_color),
            FILLED,
            FILLED,
            0,
        )?;
    }

    Ok(canvas)
}

/// Draw a dot and its index label on every detected keypoint
///
/// # Errors
///
/// Returns an error if OpenCV drawing fails
pub fn image_with_key_points(image: &Mat, keypoints: &[Option<Point>]) -> Result<Mat> {
    image_with_key_points_styled(image, keypoints, &RenderStyle::default())
}

/// [`image_with_key_points`] with an explicit style
///
/// # Errors
///
/// Returns an error if OpenCV drawing fails
pub fn image_with_key_points_styled(image: &Mat, keypoints: &[Option<Point>], style: &RenderStyle) -> Result<Mat> {
    let mut canvas = image.try_clone()?;

    for (index, point) in keypoints.iter().enumerate() {
        let Some(point) = *point else { continue };

        imgproc::circle(
            &mut canvas,
            point,
            style.point_radius,
            bgr(style.marker_color),
            FILLED,
            FILLED,
            0,
        )?;
        imgproc::put_text(
            &mut canvas,
            &index.to_string(),
            point,
            FONT_HERSHEY_SIMPLEX,
            style.font_scale,
            bgr(style.label_color),
            style.label_thickness,
            LINE_AA,
            false,
        )?;
    }

    Ok(canvas)
}
