//! Body pose estimation from images, video files and cameras.

use anyhow::Result;
use body_pose_estimation::{app::PoseApp, cli::Args};
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Body Pose Estimation");

    let config = args.into_app_config()?;

    // Create and run application
    let mut app = PoseApp::new(config)?;
    app.run()?;

    Ok(())
}
