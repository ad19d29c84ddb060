//! Pure encode/decode between payloads and bytes
//!
//! No I/O happens here: handlers hand fully buffered bytes in and out.

use std::io::Cursor;
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;
use arrow::csv::reader::Format as CsvFormat;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::SchemaRef;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::format::Format;
use crate::payload::Payload;

/// Encode a payload into bytes for the given format.
///
/// Fails with a payload mismatch when the payload kind does not fit the
/// format; never coerces.
pub fn encode(payload: &Payload, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Csv => encode_csv(payload.as_table(format)?),
        Format::Parquet => encode_parquet(payload.as_table(format)?),
        Format::Json => encode_json(payload.as_mapping(format)?),
        Format::Bin => Ok(payload.as_opaque(format)?.to_vec()),
    }
}

/// Decode bytes into a payload for the given format
pub fn decode(bytes: &[u8], format: Format) -> Result<Payload> {
    match format {
        Format::Csv => Ok(Payload::Table(decode_csv(bytes)?)),
        Format::Parquet => Ok(Payload::Table(decode_parquet(bytes)?)),
        Format::Json => Ok(Payload::Mapping(decode_json(bytes)?)),
        Format::Bin => Ok(Payload::Opaque(bytes.to_vec())),
    }
}

/// Tabular frame to UTF-8 CSV with a header row, no index column
fn encode_csv(batch: &RecordBatch) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new().with_header(true).build(&mut buf);
        writer.write(batch)?;
    }
    Ok(buf)
}

/// CSV bytes to a tabular frame, schema inferred from the data.
///
/// CSV carries no nullability information, so inference marks every
/// column nullable; names, order, dtypes, and values survive the round
/// trip, the nullable flag does not.
fn decode_csv(bytes: &[u8]) -> Result<RecordBatch> {
    let csv_format = CsvFormat::default().with_header(true);
    let (schema, _) = csv_format.infer_schema(Cursor::new(bytes), None)?;
    let schema: SchemaRef = Arc::new(schema);
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(csv_format)
        .build(Cursor::new(bytes))?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Tabular frame to a columnar Parquet buffer.
///
/// Column names, order, values, and dtypes all survive the round trip.
fn encode_parquet(batch: &RecordBatch) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(buf)
}

fn decode_parquet(bytes: &[u8]) -> Result<RecordBatch> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::copy_from_slice(bytes))?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

fn encode_json(map: &Map<String, Value>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(map)?)
}

fn decode_json(bytes: &[u8]) -> Result<Map<String, Value>> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StowageError;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use serde_json::json;

    fn example_batch() -> RecordBatch {
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
        let batch = example_batch();
        let bytes = encode(&Payload::Table(batch.clone()), Format::Csv).unwrap();
        let loaded = decode(&bytes, Format::Csv).unwrap().into_table().unwrap();
        assert_eq!(loaded, batch);
    }

    #[test]
    fn test_csv_decode_relaxes_nullability() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("a", DataType::Int64, false),
            Field::new("b", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec!["example1", "example2"])),
            ],
        )
        .unwrap();
        let bytes = encode(&Payload::Table(batch.clone()), Format::Csv).unwrap();
        let loaded = decode(&bytes, Format::Csv).unwrap().into_table().unwrap();
        for (loaded_field, saved_field) in loaded
            .schema()
            .fields()
            .iter()
            .zip(batch.schema().fields())
        {
            assert_eq!(loaded_field.name(), saved_field.name());
            assert_eq!(loaded_field.data_type(), saved_field.data_type());
            assert!(loaded_field.is_nullable());
        }
        assert_eq!(loaded.columns(), batch.columns());
    }

    #[test]
    fn test_csv_has_header_row() {
        let bytes = encode(&Payload::Table(example_batch()), Format::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("a,b"));
    }

    #[test]
    fn test_parquet_round_trip_preserves_dtypes() {
        let batch = example_batch();
        let bytes = encode(&Payload::Table(batch.clone()), Format::Parquet).unwrap();
        let loaded = decode(&bytes, Format::Parquet)
            .unwrap()
            .into_table()
            .unwrap();
        assert_eq!(loaded.schema(), batch.schema());
        assert_eq!(loaded, batch);
        assert_eq!(loaded.schema().field(0).data_type(), &DataType::Int64);
    }

    #[test]
    fn test_json_round_trip() {
        let mut map = Map::new();
        map.insert("key".to_string(), json!("value"));
        let bytes = encode(&Payload::Mapping(map.clone()), Format::Json).unwrap();
        let loaded = decode(&bytes, Format::Json).unwrap().into_mapping().unwrap();
        assert_eq!(loaded, map);
    }

    #[test]
    fn test_bin_pass_through() {
        let payload = Payload::Opaque(vec![1, 2, 3]);
        let bytes = encode(&payload, Format::Bin).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(decode(&bytes, Format::Bin).unwrap(), payload);
    }

    #[test]
    fn test_mapping_as_parquet_is_rejected() {
        let err = encode(&Payload::Mapping(Map::new()), Format::Parquet).unwrap_err();
        assert!(matches!(err, StowageError::PayloadMismatch { .. }));
    }
}
