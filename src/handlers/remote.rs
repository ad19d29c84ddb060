//! Shared plumbing for object-storage backends
//!
//! Every cloud handler owns a [`RemoteStore`]: an `object_store` client, a
//! current-thread tokio runtime to block on its futures, and the path
//! prefix prepended to every logical path. Uploads buffer the encoded
//! payload fully in memory; downloads buffer the whole object before
//! decode. No retries or timeouts are layered on top of the SDK.

use futures::StreamExt;
use object_store::path::Path as StorePath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::error::{Result, StowageError};
use crate::path::join_key;

pub(crate) struct RemoteStore {
    store: Arc<dyn ObjectStore>,
    runtime: Runtime,
    prefix: String,
}

impl RemoteStore {
    pub(crate) fn new(store: Arc<dyn ObjectStore>, prefix: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StowageError::config(format!("failed to start I/O runtime: {e}")))?;
        Ok(RemoteStore {
            store,
            runtime,
            prefix: prefix.to_string(),
        })
    }

    /// Resolve a logical path to the in-bucket key, prefix included
    pub(crate) fn key(&self, path: &Path) -> StorePath {
        StorePath::from(join_key(&self.prefix, path))
    }

    /// Upload a fully buffered object
    pub(crate) fn put(
        &self,
        path: &Path,
        bytes: Vec<u8>,
        content_type: Option<&'static str>,
    ) -> Result<()> {
        let key = self.key(path);
        tracing::debug!(key = %key, bytes = bytes.len(), "uploading object");
        let mut opts = PutOptions::default();
        if let Some(content_type) = content_type {
            let mut attributes = Attributes::new();
            attributes.insert(Attribute::ContentType, content_type.into());
            opts.attributes = attributes;
        }
        self.runtime
            .block_on(self.store.put_opts(&key, PutPayload::from(bytes), opts))?;
        Ok(())
    }

    /// Download an object, fully buffered
    pub(crate) fn get(&self, path: &Path) -> Result<Vec<u8>> {
        let key = self.key(path);
        tracing::debug!(key = %key, "downloading object");
        let bytes = self
            .runtime
            .block_on(async { self.store.get(&key).await?.bytes().await })?;
        Ok(bytes.to_vec())
    }

    /// List at most one object to verify read access.
    ///
    /// Any SDK error fails the probe; callers turn that into a
    /// construction-time failure.
    pub(crate) fn probe_read_access(&self) -> Result<()> {
        self.runtime.block_on(async {
            let mut listing = self.store.list(None);
            listing.next().await.transpose()
        })?;
        Ok(())
    }
}
