//! Command-line arguments and their mapping onto [`AppConfig`].

use crate::{
    app::{AppConfig, DrawMode, InputSource},
    config::Config,
    model::PoseModel,
    Error, Result,
};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Image file to process
    #[arg(conflicts_with_all = ["video", "cam"])]
    pub input: Option<PathBuf>,

    /// Video file to process
    #[arg(short, long, conflicts_with = "cam")]
    pub video: Option<PathBuf>,

    /// Camera index to use
    #[arg(long)]
    pub cam: Option<i32>,

    /// Pose model (COCO or MPI)
    #[arg(short, long)]
    pub model: Option<PoseModel>,

    /// Directory containing the pose/coco and pose/mpi model files
    #[arg(long)]
    pub models_dir: Option<PathBuf>,

    /// Overlay to draw (skeleton, points, none)
    #[arg(long, default_value = "skeleton")]
    pub mode: DrawMode,

    /// Override the keypoint confidence threshold
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Write the rendered image or video here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not open a display window
    #[arg(long)]
    pub no_gui: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Merge the arguments with an optional config file into an [`AppConfig`]
    ///
    /// Command-line values take precedence over the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if no input source was given, or the config file
    /// names an unknown default model
    pub fn into_app_config(self) -> Result<AppConfig> {
        let mut settings = match &self.config {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                match Config::from_file(path) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        warn!("Failed to load config file: {}. Using defaults.", e);
                        Config::default()
                    }
                }
            }
            None => Config::default(),
        };

        if let Some(root) = self.models_dir {
            settings.models.root = root;
        }
        if let Some(threshold) = self.threshold {
            settings.inference.threshold = threshold;
        }

        let source = if let Some(path) = self.input {
            InputSource::Image(path)
        } else if let Some(path) = self.video {
            InputSource::Video(path)
        } else if let Some(index) = self.cam {
            InputSource::Camera(index)
        } else {
            return Err(Error::InvalidInput(
                "No input given: pass an image path, --video or --cam".to_string(),
            ));
        };

        let model = match self.model {
            Some(model) => model,
            None => settings.default_model()?,
        };

        Ok(AppConfig {
            source,
            model,
            draw_mode: self.mode,
            output: self.output,
            show_gui: !self.no_gui,
            settings,
        })
    }
}
