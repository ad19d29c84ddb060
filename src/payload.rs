//! In-memory values that can be saved and loaded
//!
//! A [`Payload`] is the unit of persistence: a tabular record batch for
//! csv/parquet, a JSON mapping for json, or an opaque serialized blob for
//! bin. Callers own the payload before save and after load; handlers never
//! retain one past the call.

use arrow::array::RecordBatch;
use arrow::datatypes::Schema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{Result, StowageError};
use crate::format::Format;

/// The in-memory value being persisted
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A tabular frame, saved as csv or parquet
    Table(RecordBatch),
    /// A JSON object, saved as json
    Mapping(Map<String, Value>),
    /// An opaque serialized blob, saved as bin
    Opaque(Vec<u8>),
}

impl Payload {
    /// Serialize an arbitrary value into an opaque payload.
    ///
    /// Uses bincode framing; the result is only readable back through
    /// [`Payload::to_value`] in the same ecosystem.
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Payload::Opaque(bincode::serialize(value)?))
    }

    /// Deserialize an opaque payload back into a typed value.
    pub fn to_value<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Payload::Opaque(bytes) => Ok(bincode::deserialize(bytes)?),
            other => Err(other.mismatch(Format::Bin, "an opaque blob")),
        }
    }

    /// Short label for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Table(_) => "table",
            Payload::Mapping(_) => "mapping",
            Payload::Opaque(_) => "opaque",
        }
    }

    /// Extract the tabular frame, or fail with a payload mismatch
    pub fn as_table(&self, format: Format) -> Result<&RecordBatch> {
        match self {
            Payload::Table(batch) => Ok(batch),
            other => Err(other.mismatch(format, "a tabular frame")),
        }
    }

    /// Extract the JSON mapping, or fail with a payload mismatch
    pub fn as_mapping(&self, format: Format) -> Result<&Map<String, Value>> {
        match self {
            Payload::Mapping(map) => Ok(map),
            other => Err(other.mismatch(format, "a mapping")),
        }
    }

    /// Extract the opaque bytes, or fail with a payload mismatch
    pub fn as_opaque(&self, format: Format) -> Result<&[u8]> {
        match self {
            Payload::Opaque(bytes) => Ok(bytes),
            other => Err(other.mismatch(format, "an opaque blob")),
        }
    }

    /// Consume into the tabular frame, or fail with a payload mismatch
    pub fn into_table(self) -> Result<RecordBatch> {
        match self {
            Payload::Table(batch) => Ok(batch),
            other => Err(other.mismatch(Format::Parquet, "a tabular frame")),
        }
    }

    /// Consume into the JSON mapping, or fail with a payload mismatch
    pub fn into_mapping(self) -> Result<Map<String, Value>> {
        match self {
            Payload::Mapping(map) => Ok(map),
            other => Err(other.mismatch(Format::Json, "a mapping")),
        }
    }

    /// Canonical empty value for a format, as returned by the null backend
    pub fn empty(format: Format) -> Self {
        match format {
            Format::Csv | Format::Parquet => {
                Payload::Table(RecordBatch::new_empty(Arc::new(Schema::empty())))
            }
            Format::Json => Payload::Mapping(Map::new()),
            Format::Bin => Payload::Opaque(Vec::new()),
        }
    }

    fn mismatch(&self, format: Format, expected: &'static str) -> StowageError {
        StowageError::PayloadMismatch {
            format,
            expected,
            found: self.kind(),
        }
    }
}

impl From<RecordBatch> for Payload {
    fn from(batch: RecordBatch) -> Self {
        Payload::Table(batch)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Mapping(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Example {
        a: i64,
        b: String,
    }

    #[test]
    fn test_opaque_round_trip() {
        let value = Example {
            a: 1,
            b: "example".to_string(),
        };
        let payload = Payload::from_value(&value).unwrap();
        let back: Example = payload.to_value().unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_mismatch_reports_kinds() {
        let payload = Payload::Mapping(Map::new());
        let err = payload.as_table(Format::Csv).unwrap_err();
        match err {
            StowageError::PayloadMismatch { found, .. } => assert_eq!(found, "mapping"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_values() {
        match Payload::empty(Format::Csv) {
            Payload::Table(batch) => assert_eq!(batch.num_rows(), 0),
            other => panic!("unexpected payload: {:?}", other.kind()),
        }
        assert_eq!(Payload::empty(Format::Json), Payload::Mapping(Map::new()));
        assert_eq!(Payload::empty(Format::Bin), Payload::Opaque(Vec::new()));
    }
}
