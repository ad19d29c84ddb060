//! # Stowage - Uniform Save/Load Across Storage Backends
//!
//! Stowage saves and loads structured data (tabular record batches, JSON
//! mappings, opaque serialized blobs) across multiple storage backends -
//! local filesystem, Amazon S3, Google Cloud Storage, and Azure Blob
//! Storage - behind one interface keyed by file extension.
//!
//! ## Features
//!
//! - **One interface per backend**: the same calling code works unmodified
//!   against local disk, S3, GCS, Azure, or a no-op null backend
//! - **Format by extension**: `csv`, `parquet`, `json`, and `bin`/`pkl`
//!   inferred from the filename; unknown extensions fail before any I/O
//! - **Path prefixing**: each object-storage handler prepends its own
//!   prefix, emulating a subdirectory within a bucket or container
//! - **Null backend**: disable persistence entirely without changing call
//!   sites
//!
//! ## Quick Start
//!
//! ```no_run
//! use stowage::{FileManager, Payload};
//! use serde_json::Map;
//!
//! let manager = FileManager::builder()
//!     .backend("local")
//!     .default_directory("data/")
//!     .build()?;
//!
//! let mut map = Map::new();
//! map.insert("key".to_string(), "value".into());
//! manager.save(&Payload::Mapping(map), "data.json", None)?;
//! let loaded = manager.load("data.json", None)?;
//! # Ok::<(), stowage::StowageError>(())
//! ```
//!
//! ## Object Storage
//!
//! ```no_run
//! use stowage::{BackendConfig, FileManager};
//!
//! let config = BackendConfig {
//!     bucket: Some("my-bucket".to_string()),
//!     prefix: Some("my_project".to_string()),
//!     ..Default::default()
//! };
//!
//! let manager = FileManager::builder()
//!     .backend("s3")
//!     .backend_config(config)
//!     .default_directory("data/")
//!     .build()?;
//! # Ok::<(), stowage::StowageError>(())
//! ```
//!
//! All operations are synchronous and blocking: a save or load does not
//! return until the underlying I/O completes. No caching, retries, or
//! timeouts are layered on top of the storage SDKs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod format;
pub mod handlers;
pub mod manager;
pub mod path;
pub mod payload;

// Re-export commonly used types
pub use error::{Result, StowageError};
pub use format::Format;
pub use handlers::{BackendConfig, BackendKind, Handler};
pub use manager::{FileManager, FileManagerBuilder};
pub use payload::Payload;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use stowage::prelude::*;
    //! ```

    pub use crate::error::{Result, StowageError};
    pub use crate::format::Format;
    pub use crate::handlers::{
        build_handler, AzureHandler, BackendConfig, BackendKind, GcsHandler, Handler,
        LocalHandler, NullHandler, S3Handler,
    };
    pub use crate::manager::{FileManager, FileManagerBuilder};
    pub use crate::payload::Payload;
}
