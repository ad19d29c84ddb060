//! Storage backend handlers
//!
//! One handler per backend (local disk, S3, GCS, Azure Blob, plus a no-op
//! null backend), all satisfying the same capability contract. The generic
//! `save`/`load` dispatchers are built once on the trait and never
//! reimplemented per backend.

mod azure;
mod gcs;
mod local;
mod null;
mod remote;
mod s3;

pub use azure::AzureHandler;
pub use gcs::GcsHandler;
pub use local::LocalHandler;
pub use null::NullHandler;
pub use s3::S3Handler;

use arrow::array::RecordBatch;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, StowageError};
use crate::format::Format;
use crate::payload::Payload;

/// The capability contract every backend satisfies.
///
/// Backends implement the per-format hooks; the generic [`Handler::save`]
/// and [`Handler::load`] dispatchers are provided once here. The opaque
/// (`bin`) hooks are optional: the default bodies decline with a
/// format-unsupported error.
///
/// Handlers hold no per-call mutable state and are `Send + Sync`, but make
/// no further concurrency promises; underlying SDK clients manage their own
/// connections.
pub trait Handler: Send + Sync {
    /// Backend name used in error messages and logs
    fn backend_name(&self) -> &'static str;

    /// Save a tabular frame as CSV
    fn save_csv(&self, data: &RecordBatch, path: &Path) -> Result<()>;

    /// Load a CSV file into a tabular frame
    fn load_csv(&self, path: &Path) -> Result<RecordBatch>;

    /// Save a tabular frame as Parquet
    fn save_parquet(&self, data: &RecordBatch, path: &Path) -> Result<()>;

    /// Load a Parquet file into a tabular frame
    fn load_parquet(&self, path: &Path) -> Result<RecordBatch>;

    /// Save a JSON mapping
    fn save_json(&self, data: &Map<String, Value>, path: &Path) -> Result<()>;

    /// Load a JSON file into a mapping
    fn load_json(&self, path: &Path) -> Result<Map<String, Value>>;

    /// Save an opaque blob (optional capability)
    fn save_bin(&self, _data: &[u8], _path: &Path) -> Result<()> {
        Err(StowageError::unsupported(Format::Bin, self.backend_name()))
    }

    /// Load an opaque blob (optional capability)
    fn load_bin(&self, _path: &Path) -> Result<Vec<u8>> {
        Err(StowageError::unsupported(Format::Bin, self.backend_name()))
    }

    /// Save a payload, dispatching on an explicitly resolved format.
    ///
    /// The format is derived from the logical path's extension at the call
    /// boundary (see [`Format::from_path`]); the payload's runtime kind is
    /// only checked against it, never used for dispatch.
    fn save(&self, data: &Payload, path: &Path, format: Format) -> Result<()> {
        match format {
            Format::Csv => self.save_csv(data.as_table(format)?, path),
            Format::Parquet => self.save_parquet(data.as_table(format)?, path),
            Format::Json => self.save_json(data.as_mapping(format)?, path),
            Format::Bin => self.save_bin(data.as_opaque(format)?, path),
        }
    }

    /// Load a payload, dispatching on an explicitly resolved format
    fn load(&self, path: &Path, format: Format) -> Result<Payload> {
        match format {
            Format::Csv => Ok(Payload::Table(self.load_csv(path)?)),
            Format::Parquet => Ok(Payload::Table(self.load_parquet(path)?)),
            Format::Json => Ok(Payload::Mapping(self.load_json(path)?)),
            Format::Bin => Ok(Payload::Opaque(self.load_bin(path)?)),
        }
    }
}

/// The closed set of backend identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Local filesystem
    Local,
    /// Amazon S3 (and S3-compatible services)
    S3,
    /// Google Cloud Storage
    Gcs,
    /// Azure Blob Storage
    Azure,
    /// No-op backend
    Null,
}

impl BackendKind {
    /// Identifier string for this backend
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Local => "local",
            BackendKind::S3 => "s3",
            BackendKind::Gcs => "gcs",
            BackendKind::Azure => "azure",
            BackendKind::Null => "null",
        }
    }
}

impl FromStr for BackendKind {
    type Err = StowageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(BackendKind::Local),
            "s3" => Ok(BackendKind::S3),
            "gcs" => Ok(BackendKind::Gcs),
            "azure" => Ok(BackendKind::Azure),
            "null" => Ok(BackendKind::Null),
            other => Err(StowageError::UnknownBackend(other.to_string())),
        }
    }
}

/// Connection parameters for constructing a backend handler.
///
/// `client_options` is an opaque bag of SDK-specific options (credentials,
/// endpoints, timeouts) forwarded unmodified to the underlying client
/// builder; the core never interprets it.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// Bucket (S3/GCS) or container (Azure) name
    pub bucket: Option<String>,
    /// Storage account name (Azure only)
    pub account: Option<String>,
    /// Prefix prepended to every logical path before backend I/O
    pub prefix: Option<String>,
    /// Pass-through SDK client options
    pub client_options: HashMap<String, String>,
}

impl BackendConfig {
    fn require_bucket(&self, backend: &str) -> Result<&str> {
        self.bucket
            .as_deref()
            .ok_or_else(|| StowageError::config(format!("'{backend}' backend requires a bucket")))
    }

    fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }
}

/// Construct the handler registered for a backend identifier.
///
/// The mapping is static; there is no dynamic registration.
pub fn build_handler(kind: BackendKind, config: &BackendConfig) -> Result<Box<dyn Handler>> {
    match kind {
        BackendKind::Local => Ok(Box::new(LocalHandler::new())),
        BackendKind::S3 => Ok(Box::new(S3Handler::new(
            config.require_bucket("s3")?,
            config.prefix(),
            &config.client_options,
        )?)),
        BackendKind::Gcs => Ok(Box::new(GcsHandler::new(
            config.require_bucket("gcs")?,
            config.prefix(),
            &config.client_options,
        )?)),
        BackendKind::Azure => {
            let account = config.account.as_deref().ok_or_else(|| {
                StowageError::config("'azure' backend requires a storage account")
            })?;
            Ok(Box::new(AzureHandler::new(
                account,
                config.require_bucket("azure")?,
                config.prefix(),
                &config.client_options,
            )?))
        }
        BackendKind::Null => Ok(Box::new(NullHandler::new())),
    }
}
