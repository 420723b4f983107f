//! Error types for the body pose estimation library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model name is not one of the known variants
    #[error("Unknown model: {0} (expected COCO or MPI)")]
    UnknownModel(String),

    /// Topology or weights file is missing on disk
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Model loading or inference error
    #[error("Model error: {0}")]
    ModelError(String),

    /// Network output has an unexpected shape
    #[error("Model output error: {0}")]
    ModelOutputError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
