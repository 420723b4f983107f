//! Static table of the supported OpenPose Caffe models.

use crate::constants::{COCO_NUM_POINTS, MPI_NUM_POINTS};
use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const COCO_POSE_PAIRS: [(usize, usize); 17] = [
    (1, 0),
    (1, 2),
    (1, 5),
    (2, 3),
    (3, 4),
    (5, 6),
    (6, 7),
    (1, 8),
    (8, 9),
    (9, 10),
    (1, 11),
    (11, 12),
    (12, 13),
    (0, 14),
    (0, 15),
    (14, 16),
    (15, 17),
];

const MPI_POSE_PAIRS: [(usize, usize); 14] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (1, 5),
    (5, 6),
    (6, 7),
    (1, 14),
    (14, 8),
    (8, 9),
    (9, 10),
    (14, 11),
    (11, 12),
    (12, 13),
];

const COCO_KEYPOINT_NAMES: [&str; COCO_NUM_POINTS] = [
    "Nose", "Neck", "RShoulder", "RElbow", "RWrist", "LShoulder", "LElbow", "LWrist", "RHip", "RKnee", "RAnkle",
    "LHip", "LKnee", "LAnkle", "REye", "LEye", "REar", "LEar",
];

const MPI_KEYPOINT_NAMES: [&str; MPI_NUM_POINTS] = [
    "Head", "Neck", "RShoulder", "RElbow", "RWrist", "LShoulder", "LElbow", "LWrist", "RHip", "RKnee", "RAnkle",
    "LHip", "LKnee", "LAnkle", "Chest",
];

/// OpenPose model variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseModel {
    /// 18-point COCO body model
    Coco,
    /// 15-point MPII body model (faster 4-stage variant)
    Mpi,
}

impl PoseModel {
    /// All known variants
    pub const ALL: [PoseModel; 2] = [PoseModel::Coco, PoseModel::Mpi];

    /// Look up a model by its exact name (`"COCO"` or `"MPI"`)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "COCO" => Some(Self::Coco),
            "MPI" => Some(Self::Mpi),
            _ => None,
        }
    }

    /// Canonical model name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Coco => "COCO",
            Self::Mpi => "MPI",
        }
    }

    /// Network topology file, relative to the models root
    #[must_use]
    pub const fn proto_file(self) -> &'static str {
        match self {
            Self::Coco => "pose/coco/pose_deploy_linevec.prototxt",
            Self::Mpi => "pose/mpi/pose_deploy_linevec_faster_4_stages.prototxt",
        }
    }

    /// Trained weights file, relative to the models root
    #[must_use]
    pub const fn weights_file(self) -> &'static str {
        match self {
            Self::Coco => "pose/coco/pose_iter_440000.caffemodel",
            Self::Mpi => "pose/mpi/pose_iter_160000.caffemodel",
        }
    }

    /// Number of body keypoints the model reports
    #[must_use]
    pub const fn num_points(self) -> usize {
        match self {
            Self::Coco => COCO_NUM_POINTS,
            Self::Mpi => MPI_NUM_POINTS,
        }
    }

    /// Limb connections as pairs of keypoint indices
    #[must_use]
    pub fn pose_pairs(self) -> &'static [(usize, usize)] {
        match self {
            Self::Coco => &COCO_POSE_PAIRS,
            Self::Mpi => &MPI_POSE_PAIRS,
        }
    }

    /// Body part name for each keypoint index
    #[must_use]
    pub fn keypoint_names(self) -> &'static [&'static str] {
        match self {
            Self::Coco => &COCO_KEYPOINT_NAMES,
            Self::Mpi => &MPI_KEYPOINT_NAMES,
        }
    }

    /// Resolve the topology and weights paths under `root`
    pub fn model_paths<P: AsRef<Path>>(self, root: P) -> (PathBuf, PathBuf) {
        let root = root.as_ref();
        (root.join(self.proto_file()), root.join(self.weights_file()))
    }
}

impl fmt::Display for PoseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PoseModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(&s.trim().to_ascii_uppercase()).ok_or_else(|| Error::UnknownModel(s.to_string()))
    }
}
