//! No-op backend
//!
//! Accepts every save without doing anything and returns a canonical empty
//! value on every load. Useful for disabling a persistence layer in tests
//! or dry runs without changing call sites.

use arrow::array::RecordBatch;
use arrow::datatypes::Schema;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::handlers::Handler;

/// Handler that persists nothing
#[derive(Debug, Default)]
pub struct NullHandler;

impl NullHandler {
    /// Create a null handler
    pub fn new() -> Self {
        NullHandler
    }
}

impl Handler for NullHandler {
    fn backend_name(&self) -> &'static str {
        "null"
    }

    fn save_csv(&self, _data: &RecordBatch, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn load_csv(&self, _path: &Path) -> Result<RecordBatch> {
        Ok(RecordBatch::new_empty(Arc::new(Schema::empty())))
    }

    fn save_parquet(&self, _data: &RecordBatch, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn load_parquet(&self, _path: &Path) -> Result<RecordBatch> {
        Ok(RecordBatch::new_empty(Arc::new(Schema::empty())))
    }

    fn save_json(&self, _data: &Map<String, Value>, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn load_json(&self, _path: &Path) -> Result<Map<String, Value>> {
        Ok(Map::new())
    }

    fn save_bin(&self, _data: &[u8], _path: &Path) -> Result<()> {
        Ok(())
    }

    fn load_bin(&self, _path: &Path) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::payload::Payload;
    use std::path::PathBuf;

    #[test]
    fn test_load_without_prior_save_returns_empties() {
        let handler = NullHandler::new();
        let path = PathBuf::from("anything.json");
        assert_eq!(
            handler.load(&path, Format::Json).unwrap(),
            Payload::Mapping(Map::new())
        );
        match handler.load(&path, Format::Csv).unwrap() {
            Payload::Table(batch) => {
                assert_eq!(batch.num_rows(), 0);
                assert_eq!(batch.num_columns(), 0);
            }
            other => panic!("unexpected payload kind: {}", other.kind()),
        }
        assert_eq!(
            handler.load(&path, Format::Bin).unwrap(),
            Payload::Opaque(Vec::new())
        );
    }

    #[test]
    fn test_save_is_a_no_op() {
        let handler = NullHandler::new();
        let mut map = Map::new();
        map.insert("key".to_string(), Value::from("value"));
        handler
            .save(
                &Payload::Mapping(map),
                &PathBuf::from("anything.json"),
                Format::Json,
            )
            .unwrap();
    }
}
