//! Error types for Strata
//!
//! All modules use `StrataResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Strata operations
pub type StrataResult<T> = Result<T, StrataError>;

/// All errors that can occur while building a layer
#[derive(Error, Debug)]
pub enum StrataError {
    // Request validation errors
    #[error("required field missing from build request: {0}")]
    MissingField(&'static str),

    // Configuration errors
    #[error("required environment variable not set: {0}")]
    Configuration(&'static str),

    // Installer errors
    #[error("pip install failed with exit code {code}")]
    Install { code: i32 },

    // Object store errors
    #[error("failed to download s3://{bucket}/{key}: {reason}")]
    Download {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("failed to upload s3://{bucket}/{key}: {reason}")]
    Upload {
        bucket: String,
        key: String,
        reason: String,
    },

    // Archive errors
    #[error("failed to extract archive {path}: {reason}")]
    Extract { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl StrataError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a download error
    pub fn download(
        bucket: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Download {
            bucket: bucket.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an upload error
    pub fn upload(
        bucket: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Upload {
            bucket: bucket.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The logical pipeline step the error belongs to, for structured logs
    pub fn step(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "validate",
            Self::Configuration(_) => "configure",
            Self::Install { .. } => "install",
            Self::Download { .. } => "download",
            Self::Extract { .. } => "extract",
            Self::Upload { .. } => "upload",
            Self::Io { .. } => "scratch-io",
        }
    }
}
