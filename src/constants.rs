//! Constants used throughout the application

/// Network input width in pixels
pub const DEFAULT_INPUT_WIDTH: i32 = 368;

/// Network input height in pixels
pub const DEFAULT_INPUT_HEIGHT: i32 = 368;

/// Pixel scale applied when building the input blob
pub const DEFAULT_SCALE_FACTOR: f64 = 1.0 / 255.0;

/// Minimum heatmap peak for a keypoint to count as detected
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.1;

/// Directory that contains the `pose/` model tree
pub const DEFAULT_MODELS_ROOT: &str = ".";

/// Skeleton limb colour (BGR yellow)
pub const LIMB_COLOR: [f64; 3] = [0.0, 255.0, 255.0];

/// Skeleton joint colour (BGR red)
pub const JOINT_COLOR: [f64; 3] = [0.0, 0.0, 255.0];

/// Labelled keypoint marker colour (BGR yellow)
pub const MARKER_COLOR: [f64; 3] = [0.0, 255.0, 255.0];

/// Keypoint label text colour (BGR red)
pub const LABEL_COLOR: [f64; 3] = [0.0, 0.0, 255.0];

pub const DEFAULT_LIMB_THICKNESS: i32 = 2;
pub const DEFAULT_POINT_RADIUS: i32 = 8;
pub const DEFAULT_FONT_SCALE: f64 = 1.0;
pub const DEFAULT_LABEL_THICKNESS: i32 = 2;

/// Number of keypoints produced by the COCO model
pub const COCO_NUM_POINTS: usize = 18;

/// Number of keypoints produced by the MPI model
pub const MPI_NUM_POINTS: usize = 15;

/// Key codes that stop the display loop (Esc, 'q')
pub const EXIT_KEYS: [i32; 2] = [27, b'q' as i32];
