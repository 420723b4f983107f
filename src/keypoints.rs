//! Body keypoint detection with an OpenPose Caffe network run through OpenCV DNN.

use crate::{
    constants::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_INPUT_HEIGHT, DEFAULT_INPUT_WIDTH, DEFAULT_SCALE_FACTOR},
    model::PoseModel,
    utils::{bgr, image_conversion::blob_as_array4, safe_cast::rescale_coordinate},
    Error, Result,
};
use ndarray::{ArrayView2, ArrayView4, Axis};
use opencv::core::{Mat, Point, Scalar, Size, CV_32F};
use opencv::dnn::{self, Net};
use opencv::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One optional image-space location per model keypoint
pub type Keypoints = Vec<Option<Point>>;

/// Blob preprocessing and detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceParams {
    /// Network input width
    pub input_width: i32,

    /// Network input height
    pub input_height: i32,

    /// Multiplier applied to every pixel value
    pub scale_factor: f64,

    /// Per-channel mean subtracted before scaling (BGR)
    pub mean: [f64; 3],

    /// Swap the red and blue channels
    pub swap_rb: bool,

    /// Center-crop instead of stretching to the input size
    pub crop: bool,

    /// Heatmap peaks must exceed this value to be reported
    pub threshold: f64,
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self {
            input_width: DEFAULT_INPUT_WIDTH,
            input_height: DEFAULT_INPUT_HEIGHT,
            scale_factor: DEFAULT_SCALE_FACTOR,
            mean: [0.0, 0.0, 0.0],
            swap_rb: false,
            crop: false,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl InferenceParams {
    /// Network input size
    #[must_use]
    pub fn input_size(&self) -> Size {
        Size::new(self.input_width, self.input_height)
    }
}

/// Strongest response of one heatmap channel, mapped to image pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapPeak {
    /// Peak location in image coordinates
    pub location: Point,
    /// Heatmap value at the peak
    pub confidence: f32,
}

/// Keypoint detector backed by a Caffe OpenPose network
pub struct KeypointDetector {
    net: Net,
    model: PoseModel,
    params: InferenceParams,
}

impl KeypointDetector {
    /// Load the topology and weights of `model` from under `models_root`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either model file does not exist
    /// - A model path is not valid UTF-8
    /// - OpenCV fails to parse the Caffe network
    pub fn new<P: AsRef<Path>>(model: PoseModel, models_root: P, params: InferenceParams) -> Result<Self> {
        let (proto, weights) = model.model_paths(models_root);
        for path in [&proto, &weights] {
            if !path.exists() {
                return Err(Error::ModelNotFound(path.clone()));
            }
        }

        log::info!(
            "Loading {} model: {} / {}",
            model,
            proto.display(),
            weights.display()
        );

        let proto_str = proto
            .to_str()
            .ok_or_else(|| Error::InvalidInput(format!("Non UTF-8 path: {}", proto.display())))?;
        let weights_str = weights
            .to_str()
            .ok_or_else(|| Error::InvalidInput(format!("Non UTF-8 path: {}", weights.display())))?;

        let net = dnn::read_net_from_caffe(proto_str, weights_str)
            .map_err(|e| Error::ModelError(format!("Failed to load {model} network: {e}")))?;

        Ok(Self { net, model, params })
    }

    /// Model variant this detector was loaded with
    #[must_use]
    pub fn model(&self) -> PoseModel {
        self.model
    }

    /// Detect keypoints, keeping only peaks above the confidence threshold
    ///
    /// # Errors
    ///
    /// Returns an error if the image is empty, the forward pass fails, or the
    /// network output does not have one heatmap per keypoint
    pub fn detect(&mut self, image: &Mat) -> Result<Keypoints> {
        let peaks = self.detect_peaks(image)?;
        Ok(apply_threshold(&peaks, self.params.threshold))
    }

    /// Run the network and return every channel's peak, unthresholded
    ///
    /// # Errors
    ///
    /// Same conditions as [`KeypointDetector::detect`]
    pub fn detect_peaks(&mut self, image: &Mat) -> Result<Vec<HeatmapPeak>> {
        if image.empty() {
            return Err(Error::InvalidInput("Cannot detect keypoints in an empty image".to_string()));
        }

        let blob = dnn::blob_from_image(
            image,
            self.params.scale_factor,
            self.params.input_size(),
            bgr(self.params.mean),
            self.params.swap_rb,
            self.params.crop,
            CV_32F,
        )?;

        self.net.set_input(&blob, "", 1.0, Scalar::default())?;
        let output = self.net.forward_single("")?;
        let heatmaps = blob_as_array4(&output)?;

        log::debug!("{} network output shape: {:?}", self.model, heatmaps.shape());

        let peaks = heatmap_peaks(heatmaps, self.model.num_points(), image.size()?)?;
        for (name, peak) in self.model.keypoint_names().iter().zip(&peaks) {
            log::debug!(
                "{:>10}: ({:4}, {:4}) confidence {:.3}",
                name,
                peak.location.x,
                peak.location.y,
                peak.confidence
            );
        }
        Ok(peaks)
    }
}

/// Locate the maximum of each of the first `num_points` heatmap channels
///
/// `heatmaps` is the raw `[1, C, H, W]` network output. Each peak's heatmap
/// index is rescaled to `image_size` by truncating division. Ties keep the
/// first location in row-major order.
///
/// # Errors
///
/// Returns `ModelOutputError` if the batch size is not 1, there are fewer
/// channels than `num_points`, or a heatmap is empty
pub fn heatmap_peaks(heatmaps: ArrayView4<'_, f32>, num_points: usize, image_size: Size) -> Result<Vec<HeatmapPeak>> {
    let (batch, channels, height, width) = heatmaps.dim();
    if batch != 1 {
        return Err(Error::ModelOutputError(format!("Expected batch size 1, got {batch}")));
    }
    if channels < num_points {
        return Err(Error::ModelOutputError(format!(
            "Network produced {channels} heatmaps, need at least {num_points}"
        )));
    }
    if height == 0 || width == 0 {
        return Err(Error::ModelOutputError(format!("Empty heatmap of size {width}x{height}")));
    }

    heatmaps
        .index_axis(Axis(0), 0)
        .outer_iter()
        .take(num_points)
        .map(|channel| {
            let (row, col, confidence) = channel_max_loc(channel);
            Ok(HeatmapPeak {
                location: Point::new(
                    rescale_coordinate(col, width, image_size.width)?,
                    rescale_coordinate(row, height, image_size.height)?,
                ),
                confidence,
            })
        })
        .collect()
}

/// Keep peak locations whose confidence is strictly above `threshold`
#[must_use]
pub fn apply_threshold(peaks: &[HeatmapPeak], threshold: f64) -> Keypoints {
    peaks
        .iter()
        .map(|peak| (f64::from(peak.confidence) > threshold).then_some(peak.location))
        .collect()
}

/// Extract thresholded keypoints from a `[1, C, H, W]` heatmap tensor
///
/// The result always has exactly `num_points` entries.
///
/// # Errors
///
/// Same conditions as [`heatmap_peaks`]
pub fn extract_keypoints(
    heatmaps: ArrayView4<'_, f32>,
    num_points: usize,
    image_size: Size,
    threshold: f64,
) -> Result<Keypoints> {
    let peaks = heatmap_peaks(heatmaps, num_points, image_size)?;
    Ok(apply_threshold(&peaks, threshold))
}

/// One-shot keypoint estimation by model name
///
/// Returns `Ok(None)` when `model_name` is neither `"COCO"` nor `"MPI"`;
/// nothing is loaded in that case.
///
/// # Errors
///
/// Returns an error if the model files cannot be loaded or inference fails
pub fn estimate_keypoints<P: AsRef<Path>>(image: &Mat, model_name: &str, models_root: P) -> Result<Option<Keypoints>> {
    let Some(model) = PoseModel::from_name(model_name) else {
        log::warn!("Unknown pose model '{model_name}'");
        return Ok(None);
    };

    let mut detector = KeypointDetector::new(model, models_root, InferenceParams::default())?;
    detector.detect(image).map(Some)
}

fn channel_max_loc(channel: ArrayView2<'_, f32>) -> (usize, usize, f32) {
    let mut best = (0, 0, f32::NEG_INFINITY);
    for ((row, col), &value) in channel.indexed_iter() {
        if value > best.2 {
            best = (row, col, value);
        }
    }
    best
}
