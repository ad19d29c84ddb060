//! Azure Blob Storage backend
//!
//! Authenticates through the ambient Azure credential chain unless
//! overridden in the pass-through client options. Unlike the S3 and GCS
//! backends this one also implements the opaque `bin` hooks.

use arrow::array::RecordBatch;
use object_store::azure::{AzureConfigKey, MicrosoftAzureBuilder};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::format::{self, Format};
use crate::handlers::remote::RemoteStore;
use crate::handlers::Handler;
use crate::payload::Payload;

/// Handler that reads and writes blobs in an Azure storage container
pub struct AzureHandler {
    remote: RemoteStore,
}

impl AzureHandler {
    /// Connect to a container in a storage account.
    ///
    /// `client_options` is forwarded unmodified to the Azure client
    /// builder; keys follow `object_store`'s Azure configuration names
    /// (for example `azure_storage_account_key`).
    pub fn new(
        account: &str,
        container: &str,
        prefix: &str,
        client_options: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut builder = MicrosoftAzureBuilder::from_env()
            .with_account(account)
            .with_container_name(container);
        for (key, value) in client_options {
            let key: AzureConfigKey = key.parse()?;
            builder = builder.with_config(key, value);
        }
        let store = builder.build()?;
        Ok(AzureHandler {
            remote: RemoteStore::new(Arc::new(store), prefix)?,
        })
    }
}

impl Handler for AzureHandler {
    fn backend_name(&self) -> &'static str {
        "azure"
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

    fn save_bin(&self, data: &[u8], path: &Path) -> Result<()> {
        self.remote.put(path, data.to_vec(), None)
    }

    fn load_bin(&self, path: &Path) -> Result<Vec<u8>> {
        self.remote.get(path)
    }
}
