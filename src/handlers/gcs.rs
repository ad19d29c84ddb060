//! Google Cloud Storage backend
//!
//! Authentication follows the ambient GCP credential chain unless
//! overridden in the pass-through client options. CSV and JSON uploads
//! carry explicit content types.

use arrow::array::RecordBatch;
use object_store::gcp::{GoogleCloudStorageBuilder, GoogleConfigKey};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::format::{self, Format};
use crate::handlers::remote::RemoteStore;
use crate::handlers::Handler;
use crate::payload::Payload;

/// Handler that reads and writes objects in a GCS bucket.
///
/// Declines the opaque `bin` format.
pub struct GcsHandler {
    remote: RemoteStore,
}

impl GcsHandler {
    /// Connect to a bucket.
    ///
    /// `client_options` is forwarded unmodified to the GCS client builder;
    /// keys follow `object_store`'s GCP configuration names (for example
    /// `google_service_account`).
    pub fn new(
        bucket: &str,
        prefix: &str,
        client_options: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
        for (key, value) in client_options {
            let key: GoogleConfigKey = key.parse()?;
            builder = builder.with_config(key, value);
        }
        let store = builder.build()?;
        Ok(GcsHandler {
            remote: RemoteStore::new(Arc::new(store), prefix)?,
        })
    }
}

impl Handler for GcsHandler {
    fn backend_name(&self) -> &'static str {
        "gcs"
    }

    fn save_csv(&self, data: &RecordBatch, path: &Path) -> Result<()> {
        let bytes = format::encode(&Payload::Table(data.clone()), Format::Csv)?;
        self.remote.put(path, bytes, Some("text/csv"))
    }

    fn load_csv(&self, path: &Path) -> Result<RecordBatch> {
        format::decode(&self.remote.get(path)?, Format::Csv)?.into_table()
    }

    fn save_parquet(&self, data: &RecordBatch, path: &Path) -> Result<()> {
        let bytes = format::encode(&Payload::Table(data.clone()), Format::Parquet)?;
        self.remote.put(path, bytes, Some("application/octet-stream"))
    }

    fn load_parquet(&self, path: &Path) -> Result<RecordBatch> {
        format::decode(&self.remote.get(path)?, Format::Parquet)?.into_table()
    }

    fn save_json(&self, data: &Map<String, Value>, path: &Path) -> Result<()> {
        self.remote
            .put(path, serde_json::to_vec(data)?, Some("application/json"))
    }

    fn load_json(&self, path: &Path) -> Result<Map<String, Value>> {
        Ok(serde_json::from_slice(&self.remote.get(path)?)?)
    }
}
