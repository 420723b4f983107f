//! Main application module for body pose estimation.

use crate::{
    config::Config,
    constants::EXIT_KEYS,
    error::{Error, Result},
    keypoints::{KeypointDetector, Keypoints},
    model::PoseModel,
    render::{image_with_key_points_styled, image_with_skeleton_styled},
};
use log::{info, warn};
use opencv::{
    core::{Mat, Vector},
    highgui::{self, WINDOW_NORMAL},
    imgcodecs,
    prelude::*,
    videoio::{self, VideoCapture, VideoWriter, CAP_PROP_FPS},
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const WINDOW_NAME: &str = "Body Pose Estimation";
const FALLBACK_FPS: f64 = 30.0;

/// Where frames come from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Single image file
    Image(PathBuf),
    /// Video file
    Video(PathBuf),
    /// Webcam index
    Camera(i32),
}

/// What to draw on top of each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Limbs between connected keypoints plus joint dots
    Skeleton,
    /// Dots labelled with their keypoint index
    KeyPoints,
    /// Leave the frame as is
    None,
}

impl std::str::FromStr for DrawMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "skeleton" => Ok(Self::Skeleton),
            "points" | "keypoints" => Ok(Self::KeyPoints),
            "none" => Ok(Self::None),
            other => Err(Error::InvalidInput(format!("Unknown draw mode: {other}"))),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Frame source
    pub source: InputSource,
    /// Model variant to load
    pub model: PoseModel,
    /// Overlay to render
    pub draw_mode: DrawMode,
    /// Where to write the rendered image or video
    pub output: Option<PathBuf>,
    /// Show results in a window
    pub show_gui: bool,
    /// Model paths, inference and render settings
    pub settings: Config,
}

/// Main application struct
pub struct PoseApp {
    config: AppConfig,
    detector: KeypointDetector,
}

impl PoseApp {
    /// Create a new pose estimation application
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing Body Pose Estimation application");

        config.settings.validate()?;
        let detector = KeypointDetector::new(
            config.model,
            &config.settings.models.root,
            config.settings.inference.clone(),
        )?;

        if config.show_gui {
            highgui::named_window(WINDOW_NAME, WINDOW_NORMAL)?;
        }

        Ok(Self { config, detector })
    }

    /// Run the application against the configured source
    pub fn run(&mut self) -> Result<()> {
        match self.config.source.clone() {
            InputSource::Image(path) => self.run_image(&path),
            InputSource::Video(path) => {
                info!("Opening video file: {}", path.display());
                let capture = VideoCapture::from_file(&path_str(&path)?, videoio::CAP_ANY)?;
                self.run_stream(capture, true)
            }
            InputSource::Camera(index) => {
                info!("Opening camera {}", index);
                let capture = VideoCapture::new(index, videoio::CAP_ANY)?;
                self.run_stream(capture, false)
            }
        }
    }

    /// Detect and render a single frame
    pub fn process_frame(&mut self, frame: &Mat) -> Result<(Keypoints, Mat)> {
        let keypoints = self.detector.detect(frame)?;
        let style = &self.config.settings.render;
        let rendered = match self.config.draw_mode {
            DrawMode::Skeleton => image_with_skeleton_styled(frame, &keypoints, self.config.model.pose_pairs(), style)?,
            DrawMode::KeyPoints => image_with_key_points_styled(frame, &keypoints, style)?,
            DrawMode::None => frame.try_clone()?,
        };
        Ok((keypoints, rendered))
    }

    fn run_image(&mut self, path: &std::path::Path) -> Result<()> {
        info!("Reading image: {}", path.display());
        let image = imgcodecs::imread(&path_str(path)?, imgcodecs::IMREAD_COLOR)?;
        if image.empty() {
            return Err(Error::InvalidInput(format!("Could not read image: {}", path.display())));
        }

        let started = Instant::now();
        let (keypoints, rendered) = self.process_frame(&image)?;
        info!("Inference took {:.1} ms", started.elapsed().as_secs_f64() * 1000.0);

        self.report(&keypoints);

        if let Some(output) = &self.config.output {
            if !imgcodecs::imwrite(&path_str(output)?, &rendered, &Vector::new())? {
                return Err(Error::InvalidInput(format!("Could not write image: {}", output.display())));
            }
            info!("Wrote {}", output.display());
        }

        if self.config.show_gui {
            highgui::imshow(WINDOW_NAME, &rendered)?;
            highgui::wait_key(0)?;
        }

        Ok(())
    }

    fn run_stream(&mut self, mut capture: VideoCapture, is_file: bool) -> Result<()> {
        if !capture.is_opened()? {
            return Err(Error::InvalidInput("Could not open video source".to_string()));
        }

        let mut writer: Option<VideoWriter> = None;
        let mut frame_count = 0u64;
        let start_time = Instant::now();
        let mut last_fps_update = Instant::now();

        info!("Entering main loop");
        loop {
            let mut frame = Mat::default();
            if !capture.read(&mut frame)? || frame.empty() {
                if is_file {
                    info!("End of video file reached");
                    break;
                }
                warn!("Failed to read frame, retrying...");
                continue;
            }

            let (keypoints, rendered) = self.process_frame(&frame)?;
            log::debug!(
                "Frame {}: {}/{} keypoints",
                frame_count,
                keypoints.iter().flatten().count(),
                keypoints.len()
            );

            if let Some(output) = &self.config.output {
                if writer.is_none() {
                    writer = Some(open_writer(output, &capture, &rendered)?);
                }
                if let Some(writer) = writer.as_mut() {
                    writer.write(&rendered)?;
                }
            }

            frame_count += 1;
            if last_fps_update.elapsed() >= Duration::from_secs(1) {
                #[allow(clippy::cast_precision_loss)]
                let fps = frame_count as f64 / start_time.elapsed().as_secs_f64();
                info!("Processed {} frames ({:.1} FPS)", frame_count, fps);
                last_fps_update = Instant::now();
            }

            if self.config.show_gui {
                highgui::imshow(WINDOW_NAME, &rendered)?;
                let key = highgui::wait_key(1)?;
                if EXIT_KEYS.contains(&key) {
                    info!("Exit requested by user");
                    break;
                }
            }
        }

        if let Some(mut writer) = writer {
            writer.release()?;
        }
        info!("Processed {} frames in total", frame_count);
        Ok(())
    }

    fn report(&self, keypoints: &Keypoints) {
        let names = self.config.model.keypoint_names();
        let found = keypoints.iter().flatten().count();
        info!("{} model: {}/{} keypoints detected", self.config.model, found, keypoints.len());
        for (index, (name, point)) in names.iter().zip(keypoints).enumerate() {
            match point {
                Some(p) => info!("{:2} {:>10}: ({}, {})", index, name, p.x, p.y),
                None => info!("{:2} {:>10}: not found", index, name),
            }
        }
    }
}

fn open_writer(output: &std::path::Path, capture: &VideoCapture, first: &Mat) -> Result<VideoWriter> {
    let fps = match capture.get(CAP_PROP_FPS)? {
        fps if fps > 0.0 => fps,
        _ => FALLBACK_FPS,
    };
    let fourcc = VideoWriter::fourcc('m', 'p', '4', 'v')?;
    let writer = VideoWriter::new(&path_str(output)?, fourcc, fps, first.size()?, true)?;
    if !writer.is_opened()? {
        return Err(Error::InvalidInput(format!("Could not open video writer: {}", output.display())));
    }
    info!("Writing video to {} at {:.1} FPS", output.display(), fps);
    Ok(writer)
}

fn path_str(path: &std::path::Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidInput(format!("Non UTF-8 path: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_mode_parsing() {
        assert_eq!("skeleton".parse::<DrawMode>().unwrap(), DrawMode::Skeleton);
        assert_eq!("Points".parse::<DrawMode>().unwrap(), DrawMode::KeyPoints);
        assert_eq!("keypoints".parse::<DrawMode>().unwrap(), DrawMode::KeyPoints);
        assert_eq!("none".parse::<DrawMode>().unwrap(), DrawMode::None);
        assert!("heatmap".parse::<DrawMode>().is_err());
    }

    #[test]
    fn test_path_str() {
        assert_eq!(path_str(std::path::Path::new("out/pose.png")).unwrap(), "out/pose.png");
    }

    #[test]
    fn test_new_fails_without_models() {
        let mut settings = Config::default();
        settings.models.root = PathBuf::from("/nonexistent/openpose");
        let config = AppConfig {
            source: InputSource::Image(PathBuf::from("person.jpg")),
            model: PoseModel::Coco,
            draw_mode: DrawMode::Skeleton,
            output: None,
            show_gui: false,
            settings,
        };
        assert!(matches!(PoseApp::new(config), Err(Error::ModelNotFound(_))));
    }
}
