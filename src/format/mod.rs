//! File formats and their codecs
//!
//! The file extension is the sole source of truth for format selection:
//! an unknown or missing extension is a hard failure, never a fallback
//! guess.

mod codec;

pub use codec::{decode, encode};

use std::fmt;
use std::path::Path;

use crate::error::{Result, StowageError};

/// Supported persistence formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Tabular frame as UTF-8 CSV with a header row
    Csv,
    /// Tabular frame as columnar Parquet
    Parquet,
    /// JSON mapping as UTF-8 text
    Json,
    /// Opaque bincode-framed blob (not portable across ecosystems)
    Bin,
}

impl Format {
    /// Infer the format from a logical path's extension.
    ///
    /// Fails with [`StowageError::MissingExtension`] when the path has no
    /// extension and [`StowageError::UnrecognizedExtension`] when the
    /// extension is outside the supported set.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| StowageError::MissingExtension(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// Map an extension (without the dot) to a format
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            "csv" => Ok(Format::Csv),
            "parquet" => Ok(Format::Parquet),
            "json" => Ok(Format::Json),
            "bin" | "pkl" => Ok(Format::Bin),
            other => Err(StowageError::UnrecognizedExtension(other.to_string())),
        }
    }

    /// Canonical extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Parquet => "parquet",
            Format::Json => "json",
            Format::Bin => "bin",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
