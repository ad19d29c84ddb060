//! Local filesystem backend

use arrow::array::RecordBatch;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::{IoResultExt, Result, StowageError};
use crate::format::{self, Format};
use crate::handlers::Handler;
use crate::payload::Payload;

/// Handler that reads and writes files on the local filesystem.
///
/// Paths are used as resolved by the caller; no prefixing is applied.
#[derive(Debug, Default)]
pub struct LocalHandler;

impl LocalHandler {
    /// Create a local filesystem handler
    pub fn new() -> Self {
        LocalHandler
    }

    /// Create a directory, including missing parents.
    ///
    /// The target must be a directory path: if it already exists as
    /// something else, this fails with a validation error before touching
    /// the filesystem. Creating an already-existing directory is not an
    /// error.
    pub fn make_directory(&self, directory: &Path) -> Result<()> {
        if directory.exists() && !directory.is_dir() {
            return Err(StowageError::NotADirectory(directory.to_path_buf()));
        }
        fs::create_dir_all(directory).with_path(directory)?;
        tracing::debug!(directory = %directory.display(), "directory created");
        Ok(())
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes).with_path(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_path(path)
    }
}

impl Handler for LocalHandler {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    fn save_csv(&self, data: &RecordBatch, path: &Path) -> Result<()> {
        let bytes = format::encode(&Payload::Table(data.clone()), Format::Csv)?;
        self.write(path, &bytes)
    }

    fn load_csv(&self, path: &Path) -> Result<RecordBatch> {
        format::decode(&self.read(path)?, Format::Csv)?.into_table()
    }

    fn save_parquet(&self, data: &RecordBatch, path: &Path) -> Result<()> {
        let bytes = format::encode(&Payload::Table(data.clone()), Format::Parquet)?;
        self.write(path, &bytes)
    }

    fn load_parquet(&self, path: &Path) -> Result<RecordBatch> {
        format::decode(&self.read(path)?, Format::Parquet)?.into_table()
    }

    fn save_json(&self, data: &Map<String, Value>, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(data)?;
        self.write(path, &bytes)
    }

    fn load_json(&self, path: &Path) -> Result<Map<String, Value>> {
        Ok(serde_json::from_slice(&self.read(path)?)?)
    }

    fn save_bin(&self, data: &[u8], path: &Path) -> Result<()> {
        self.write(path, data)
    }

    fn load_bin(&self, path: &Path) -> Result<Vec<u8>> {
        self.read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use serde_json::json;
    use std::sync::Arc;

    fn example_batch() -> RecordBatch {
        // nullable fields: CSV schema inference never yields anything else
        let schema = Arc::new(Schema::new(vec![
            Field::new("a", DataType::Int64, true),
            Field::new("b", DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec!["example1", "example2"])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.csv");
        let handler = LocalHandler::new();
        let batch = example_batch();
        handler.save_csv(&batch, &path).unwrap();
        assert_eq!(handler.load_csv(&path).unwrap(), batch);
    }

    #[test]
    fn test_parquet_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.parquet");
        let handler = LocalHandler::new();
        let batch = example_batch();
        handler.save_parquet(&batch, &path).unwrap();
        let loaded = handler.load_parquet(&path).unwrap();
        assert_eq!(loaded.schema(), batch.schema());
        assert_eq!(loaded, batch);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");
        let handler = LocalHandler::new();
        let mut map = Map::new();
        map.insert("key".to_string(), json!("value"));
        handler.save_json(&map, &path).unwrap();
        assert_eq!(handler.load_json(&path).unwrap(), map);
    }

    #[test]
    fn test_bin_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.bin");
        let handler = LocalHandler::new();
        handler.save_bin(&[1, 2, 3], &path).unwrap();
        assert_eq!(handler.load_bin(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_make_directory_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/sub");
        let handler = LocalHandler::new();
        handler.make_directory(&target).unwrap();
        handler.make_directory(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_make_directory_rejects_file_target() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        fs::write(&file, b"x").unwrap();
        let err = LocalHandler::new().make_directory(&file).unwrap_err();
        assert!(matches!(err, StowageError::NotADirectory(_)));
    }

    #[test]
    fn test_generic_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.csv");
        let handler = LocalHandler::new();
        let payload = Payload::Table(example_batch());
        handler.save(&payload, &path, Format::Csv).unwrap();
        assert_eq!(handler.load(&path, Format::Csv).unwrap(), payload);
    }
}
