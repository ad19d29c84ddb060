//! The save/load facade
//!
//! A [`FileManager`] binds exactly one backend handler and an optional
//! default directory. It resolves the effective directory, infers the
//! format from the filename extension, and delegates to the handler; the
//! handler binding is immutable after construction, the default directory
//! is not.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, StowageError};
use crate::format::Format;
use crate::handlers::{build_handler, BackendConfig, BackendKind, Handler};
use crate::payload::Payload;

/// Facade for saving and loading files through a bound backend handler.
///
/// # Examples
///
/// ```no_run
/// use stowage::{FileManager, Payload};
/// use serde_json::Map;
///
/// let manager = FileManager::builder()
///     .backend("local")
///     .default_directory("data/")
///     .build()?;
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), "value".into());
/// manager.save(&Payload::Mapping(map), "data.json", None)?;
/// let loaded = manager.load("data.json", None)?;
/// # Ok::<(), stowage::StowageError>(())
/// ```
pub struct FileManager {
    default_directory: Option<PathBuf>,
    handler: Box<dyn Handler>,
}

impl FileManager {
    /// Start building a manager
    pub fn builder() -> FileManagerBuilder {
        FileManagerBuilder::default()
    }

    /// The currently configured default directory
    pub fn default_directory(&self) -> Option<&Path> {
        self.default_directory.as_deref()
    }

    /// Set the default directory
    pub fn set_default_directory(&mut self, directory: impl Into<PathBuf>) {
        self.default_directory = Some(directory.into());
    }

    /// Clear the default directory; subsequent calls must supply one
    pub fn clear_default_directory(&mut self) {
        self.default_directory = None;
    }

    /// The bound handler
    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    /// Save a payload under `directory/filename`.
    ///
    /// An explicit `directory` overrides the stored default; with neither
    /// this fails with [`StowageError::NoDirectory`]. The format is
    /// inferred from the filename extension before any I/O, so a filename
    /// without a recognized extension fails with no side effect.
    pub fn save(&self, data: &Payload, filename: &str, directory: Option<&Path>) -> Result<()> {
        let (path, format) = self.resolve(filename, directory)?;
        self.handler.save(data, &path, format)
    }

    /// Load the payload stored under `directory/filename`
    pub fn load(&self, filename: &str, directory: Option<&Path>) -> Result<Payload> {
        let (path, format) = self.resolve(filename, directory)?;
        self.handler.load(&path, format)
    }

    /// Resolve the effective directory and infer the format, before I/O
    fn resolve(&self, filename: &str, directory: Option<&Path>) -> Result<(PathBuf, Format)> {
        let directory = directory
            .or(self.default_directory.as_deref())
            .ok_or(StowageError::NoDirectory)?;
        let path = directory.join(filename);
        let format = Format::from_path(&path)?;
        Ok((path, format))
    }
}

impl fmt::Debug for FileManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileManager")
            .field("default_directory", &self.default_directory)
            .field("backend", &self.handler.backend_name())
            .finish()
    }
}

/// Builder for [`FileManager`].
///
/// Exactly one of [`backend`](Self::backend) and
/// [`handler`](Self::handler) must be supplied; supplying neither or both
/// is a configuration error at [`build`](Self::build) time.
#[derive(Default)]
pub struct FileManagerBuilder {
    backend: Option<String>,
    config: BackendConfig,
    handler: Option<Box<dyn Handler>>,
    default_directory: Option<PathBuf>,
}

impl FileManagerBuilder {
    /// Select a backend by identifier (`local`, `s3`, `gcs`, `azure`, `null`)
    pub fn backend(mut self, identifier: impl Into<String>) -> Self {
        self.backend = Some(identifier.into());
        self
    }

    /// Supply a handler instance directly.
    ///
    /// Prefer [`backend`](Self::backend) unless a custom handler or a
    /// specially configured one is needed.
    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Connection parameters for the selected backend
    pub fn backend_config(mut self, config: BackendConfig) -> Self {
        self.config = config;
        self
    }

    /// Default directory used when a call supplies none
    pub fn default_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.default_directory = Some(directory.into());
        self
    }

    /// Construct the manager, validating the backend/handler choice
    pub fn build(self) -> Result<FileManager> {
        let handler = match (self.backend, self.handler) {
            (None, None) => {
                return Err(StowageError::config(
                    "one of either 'backend' or 'handler' must be supplied",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(StowageError::config(
                    "only one of either 'backend' or 'handler' should be supplied",
                ))
            }
            (Some(identifier), None) => {
                let kind: BackendKind = identifier.parse()?;
                build_handler(kind, &self.config)?
            }
            (None, Some(handler)) => handler,
        };
        Ok(FileManager {
            default_directory: self.default_directory,
            handler,
        })
    }
}
