//! Custom error types for radiograph-pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the radiograph-pipeline library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to decode a raw image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to read a normalized array file.
    #[error("failed to load array from {path}: {source}")]
    ArrayLoad {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    /// Failed to write a normalized array file.
    #[error("failed to save array to {path}: {source}")]
    ArraySave {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    /// Array has no samples to analyze.
    #[error("array has no samples")]
    EmptyArray,

    /// Array layout cannot be fed to the metric computations.
    #[error("array shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to list an input directory.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write or read the results table.
    #[error("failed to access report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for radiograph-pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
