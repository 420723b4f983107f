//! Body pose estimation library for human keypoint detection.
//!
//! This library estimates body keypoints from a single image using the
//! pretrained OpenPose Caffe networks, run through `OpenCV`'s DNN module:
//! - COCO: 18 keypoints, 17 limbs
//! - MPI: 15 keypoints, 14 limbs
//!
//! The estimation pipeline consists of:
//! 1. Resize and scale the image into a 368x368 input blob
//! 2. Forward the blob through the network to get per-keypoint heatmaps
//! 3. Take the strongest response of each heatmap and rescale it to image pixels
//! 4. Drop keypoints whose response does not exceed the confidence threshold
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use body_pose_estimation::{
//!     keypoints::{InferenceParams, KeypointDetector},
//!     model::PoseModel,
//!     render::image_with_skeleton,
//! };
//! use opencv::{core::Vector, imgcodecs};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut detector = KeypointDetector::new(PoseModel::Coco, "models", InferenceParams::default())?;
//!
//! let image = imgcodecs::imread("person.jpg", imgcodecs::IMREAD_COLOR)?;
//! let keypoints = detector.detect(&image)?;
//!
//! for (name, point) in PoseModel::Coco.keypoint_names().iter().zip(&keypoints) {
//!     if let Some(p) = point {
//!         println!("{name}: ({}, {})", p.x, p.y);
//!     }
//! }
//!
//! let skeleton = image_with_skeleton(&image, &keypoints, PoseModel::Coco.pose_pairs())?;
//! imgcodecs::imwrite("skeleton.jpg", &skeleton, &Vector::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Lookup by Name
//!
//! ```no_run
//! use body_pose_estimation::keypoints::estimate_keypoints;
//! use opencv::imgcodecs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = imgcodecs::imread("person.jpg", imgcodecs::IMREAD_COLOR)?;
//!
//! match estimate_keypoints(&image, "MPI", "models")? {
//!     Some(points) => println!("{} keypoints", points.iter().flatten().count()),
//!     None => println!("unknown model"),
//! }
//! # Ok(())
//! # }
//! ```

/// Static table of supported models
pub mod model;

/// Keypoint detection and heatmap peak extraction
pub mod keypoints;

/// Skeleton and keypoint drawing
pub mod render;

/// Utility functions for blob conversion and coordinate transformations
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Command-line interface
pub mod cli;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
pub use keypoints::Keypoints;
pub use model::PoseModel;
