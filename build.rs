//! Build script for detecting system dependencies and providing installation guidance.
//!
//! This script checks for the OpenCV libraries (with the dnn module) and
//! pkg-config, and prints helpful warnings if they are missing.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    check_pkg_config();
    check_opencv();

    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
}

fn pkg_config_query(args: &[&str]) -> Option<String> {
    match Command::new("pkg-config").args(args).output() {
        Ok(output) if output.status.success() => Some(String::from_utf8_lossy(&output.stdout).trim().to_string()),
        _ => None,
    }
}

fn check_opencv() {
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    let found = ["opencv4", "opencv"]
        .iter()
        .find_map(|name| pkg_config_query(&["--modversion", name]).map(|version| (*name, version)));

    match found {
        Some((name, version)) => {
            println!("cargo:warning=Found OpenCV version: {version}");
            let libs = pkg_config_query(&["--libs", name]).unwrap_or_default();
            if !libs.contains("opencv_dnn") {
                println!("cargo:warning=OpenCV dnn module not listed by pkg-config; Caffe models will not load.");
            }
        }
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev");
            println!("cargo:warning=On macOS: brew install opencv");
        }
    }
}

fn check_pkg_config() {
    if pkg_config_query(&["--version"]).is_none() {
        println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
        println!("cargo:warning=On macOS: brew install pkg-config");
    }
}
