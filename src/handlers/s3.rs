//! Amazon S3 backend
//!
//! Credentials resolve through the standard AWS environment chain unless
//! overridden in the pass-through client options. Construction performs an
//! eager read probe (listing at most one object) and fails if the bucket
//! cannot be read.

use arrow::array::RecordBatch;
use object_store::aws::{AmazonS3Builder, AmazonS3ConfigKey};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, StowageError};
use crate::format::{self, Format};
use crate::handlers::remote::RemoteStore;
use crate::handlers::Handler;
use crate::payload::Payload;

/// Handler that reads and writes objects in an S3 bucket.
///
/// Declines the opaque `bin` format.
pub struct S3Handler {
    remote: RemoteStore,
}

impl S3Handler {
    /// Connect to a bucket and verify read access.
    ///
    /// `client_options` is forwarded unmodified to the S3 client builder;
    /// keys follow `object_store`'s S3 configuration names (for example
    /// `aws_endpoint`, `aws_access_key_id`). Any probe error fails
    /// construction.
    pub fn new(
        bucket: &str,
        prefix: &str,
        client_options: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        for (key, value) in client_options {
            let key: AmazonS3ConfigKey = key.parse()?;
            builder = builder.with_config(key, value);
        }
        let store = builder.build()?;
        let remote = RemoteStore::new(Arc::new(store), prefix)?;
        remote.probe_read_access().map_err(|e| {
            StowageError::config(format!("read access to bucket '{bucket}' failed: {e}"))
        })?;
        Ok(S3Handler { remote })
    }
}

impl Handler for S3Handler {
    fn backend_name(&self) -> &'static str {
        "s3"
    }

    fn save_csv(&self, data: &RecordBatch, path: &Path) -> Result<()> {
        let bytes = format::encode(&Payload::Table(data.clone()), Format::Csv)?;
        self.remote.put(path, bytes, None)
    }

    fn load_csv(&self, path: &Path) -> Result<RecordBatch> {
        format::decode(&self.remote.get(path)?, Format::Csv)?.into_table()
    }

    fn save_parquet(&self, data: &RecordBatch, path: &Path) -> Result<()> {
        let bytes = format::encode(&Payload::Table(data.clone()), Format::Parquet)?;
        self.remote.put(path, bytes, None)
    }

    fn load_parquet(&self, path: &Path) -> Result<RecordBatch> {
        format::decode(&self.remote.get(path)?, Format::Parquet)?.into_table()
    }

    fn save_json(&self, data: &Map<String, Value>, path: &Path) -> Result<()> {
        self.remote.put(path, serde_json::to_vec(data)?, None)
    }

    fn load_json(&self, path: &Path) -> Result<Map<String, Value>> {
        Ok(serde_json::from_slice(&self.remote.get(path)?)?)
    }
}
