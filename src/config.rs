//! Configuration management for the body pose estimation tool

use crate::{
    constants::DEFAULT_MODELS_ROOT, keypoints::InferenceParams, model::PoseModel, render::RenderStyle, Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model location and selection
    pub models: ModelConfig,

    /// Blob preprocessing and detection threshold
    pub inference: InferenceParams,

    /// Drawing colours and sizes
    pub render: RenderStyle,
}

/// Model file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory that contains the `pose/coco` and `pose/mpi` trees
    pub root: PathBuf,

    /// Model used when none is given on the command line
    pub default_model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_MODELS_ROOT),
            default_model: PoseModel::Coco.name().to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Model named by `models.default_model`
    pub fn default_model(&self) -> Result<PoseModel> {
        self.models.default_model.parse()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.default_model()
            .map_err(|_| Error::ConfigError(format!("Unknown default model: {}", self.models.default_model)))?;

        let inference = &self.inference;
        if inference.input_width <= 0 || inference.input_height <= 0 {
            return Err(Error::ConfigError(format!(
                "Input size must be positive, got {}x{}",
                inference.input_width, inference.input_height
            )));
        }
        if !(inference.scale_factor > 0.0 && inference.scale_factor.is_finite()) {
            return Err(Error::ConfigError("Scale factor must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&inference.threshold) {
            return Err(Error::ConfigError(
                "Confidence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        let render = &self.render;
        if render.point_radius <= 0 {
            return Err(Error::ConfigError("Point radius must be greater than 0".to_string()));
        }
        if render.limb_thickness <= 0 || render.label_thickness <= 0 {
            return Err(Error::ConfigError("Line thickness must be greater than 0".to_string()));
        }
        if render.font_scale <= 0.0 {
            return Err(Error::ConfigError("Font scale must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// Check that the topology and weights of `model` exist under `models.root`
    pub fn validate_model_files(&self, model: PoseModel) -> Result<()> {
        let (proto, weights) = model.model_paths(&self.models.root);
        for path in [proto, weights] {
            if !path.exists() {
                return Err(Error::ModelNotFound(path));
            }
        }
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Body Pose Estimation Configuration

# Model files
models:
  root: "."
  default_model: "COCO"

# Network input and detection
inference:
  input_width: 368
  input_height: 368
  scale_factor: 0.00392156862745098
  mean: [0.0, 0.0, 0.0]
  swap_rb: false
  crop: false
  threshold: 0.1

# Drawing (BGR colours)
render:
  limb_color: [0.0, 255.0, 255.0]
  limb_thickness: 2
  joint_color: [0.0, 0.0, 255.0]
  marker_color: [0.0, 255.0, 255.0]
  label_color: [0.0, 0.0, 255.0]
  point_radius: 8
  font_scale: 1.0
  label_thickness: 2
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_model().unwrap(), PoseModel::Coco);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.models, defaults.models);
        assert_eq!(parsed.render, defaults.render);
        assert_eq!(parsed.inference.input_size(), defaults.inference.input_size());
        assert!((parsed.inference.scale_factor - defaults.inference.scale_factor).abs() < 1e-12);
        assert!((parsed.inference.threshold - defaults.inference.threshold).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = serde_yaml::from_str("inference:\n  threshold: 0.3\n").unwrap();
        assert!((parsed.inference.threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(parsed.inference.input_width, 368);
        assert_eq!(parsed.models.default_model, "COCO");
        assert_eq!(parsed.render.point_radius, 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.inference.threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.inference.input_width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.inference.scale_factor = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.render.point_radius = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.models.default_model = "BODY_25".to_string();
        match config.validate() {
            Err(Error::ConfigError(msg)) => assert!(msg.contains("BODY_25")),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_model_files() {
        let mut config = Config::default();
        config.models.root = PathBuf::from("/nonexistent/openpose");
        assert!(matches!(
            config.validate_model_files(PoseModel::Coco),
            Err(Error::ModelNotFound(_))
        ));
    }
}
