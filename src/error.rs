//! Error types for stowage
//!
//! This module defines all error types used throughout the crate,
//! providing detailed error information for debugging and user feedback.

use std::path::PathBuf;
use thiserror::Error;

use crate::format::Format;

/// Main error type for stowage operations
#[derive(Error, Debug)]
pub enum StowageError {
    /// Construction-time contract violation (manager or handler configuration)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend identifier outside the registered set
    #[error("Unknown backend '{0}' (expected one of: local, s3, gcs, azure, null)")]
    UnknownBackend(String),

    /// Filename carries no extension, so no format can be inferred
    #[error("No file extension in '{0}', cannot infer format")]
    MissingExtension(String),

    /// Extension present but not a recognized format
    #[error("Unrecognized file extension '{0}'")]
    UnrecognizedExtension(String),

    /// No directory supplied and no default directory configured
    #[error(
        "No directory supplied and no default directory configured. \
         Pass a directory to the call or set one via set_default_directory"
    )]
    NoDirectory,

    /// Directory-creation target exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Format not supported by the active backend
    #[error("Format '{format}' is not implemented by the '{backend}' backend")]
    FormatUnsupported {
        format: Format,
        backend: &'static str,
    },

    /// Payload type incompatible with the requested format
    #[error("Payload of kind '{found}' cannot be encoded as '{format}' (expected {expected})")]
    PayloadMismatch {
        format: Format,
        expected: &'static str,
        found: &'static str,
    },

    /// I/O error during local file operations
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from an object-storage client
    #[error("Object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// Arrow-level encode/decode error (CSV codec, batch concatenation)
    #[error("Arrow codec error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet encode/decode error
    #[error("Parquet codec error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// JSON encode/decode error
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    /// Opaque-blob encode/decode error
    #[error("Binary codec error: {0}")]
    Bin(#[from] bincode::Error),
}

impl StowageError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a format-unsupported error for a backend
    pub fn unsupported(format: Format, backend: &'static str) -> Self {
        Self::FormatUnsupported { format, backend }
    }

    /// Check if this error is a validation failure (raised before any I/O)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingExtension(_)
                | Self::UnrecognizedExtension(_)
                | Self::NoDirectory
                | Self::NotADirectory(_)
        )
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::NotADirectory(path) => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for stowage operations
pub type Result<T> = std::result::Result<T, StowageError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| StowageError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StowageError::io("/test/path", io_err);
        assert!(err.path().is_some());
        assert_eq!(err.path().unwrap(), &PathBuf::from("/test/path"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(StowageError::NoDirectory.is_validation());
        assert!(StowageError::MissingExtension("data".into()).is_validation());
        assert!(!StowageError::UnknownBackend("ftp".into()).is_validation());
    }

    #[test]
    fn test_unknown_backend_message_lists_identifiers() {
        let err = StowageError::UnknownBackend("ftp".into());
        let msg = err.to_string();
        assert!(msg.contains("ftp"));
        assert!(msg.contains("local"));
    }
}
