//! Crate error type.
//!
//! All fallible operations return [`Result`]. Errors are fatal: this is an
//! offline batch tool, so there is no retry or partial-failure recovery -
//! the first error aborts the whole preparation run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Filesystem failure (missing file, permissions, short read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The `.npy` file could not be parsed into an array.
    #[error("failed to read array: {0}")]
    NpyRead(#[from] ndarray_npy::ReadNpyError),

    /// A cache artifact could not be serialized.
    #[error("failed to write array: {0}")]
    NpyWrite(#[from] ndarray_npy::WriteNpyError),

    /// An array could not be reshaped into the expected dimensions.
    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Cache metadata could not be read or written.
    #[error("cache metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// The raw file's element count does not divide into whole samples.
    #[error(
        "{}: {elements} values do not divide into ({seq} positions x {features} features) samples",
        .path.display()
    )]
    BadShape {
        /// Offending file.
        path: PathBuf,
        /// Total element count found.
        elements: usize,
        /// Expected positions per sample.
        seq: usize,
        /// Expected features per position.
        features: usize,
    },

    /// A configuration value is out of range (caught before any computation).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cache artifact on disk does not match the configured parameters.
    #[error("stale cache at {}: {reason}", .path.display())]
    StaleCache {
        /// Offending artifact.
        path: PathBuf,
        /// What disagreed.
        reason: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DatasetError>;
