//! Error types for the checksum diff engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating roots, walking trees or hashing files
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid directory {path:?}: {reason}")]
    Validation { path: PathBuf, reason: String },

    #[error("Failed to walk directory {path:?}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to hash file {path:?}: {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Scan task failed: {0}")]
    TaskFailed(String),
}

impl ScanError {
    pub fn validation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ScanError::Validation {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced to the command-line layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Resource error: {0}")]
    ResourceError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
