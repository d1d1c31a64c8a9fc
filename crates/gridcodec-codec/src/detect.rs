//! Field type detection

use gridcodec_types::{Column, FieldType, Record, Schema, Value};
use tracing::debug;

use crate::CodecError;

/// Fix the type of every field by inspecting the first record only.
///
/// Later records are never consulted, so a malformed row further down
/// cannot change a column's type.
pub fn detect(records: &[Record]) -> Result<Schema, CodecError> {
    let first = records.first().ok_or_else(|| {
        CodecError::MalformedInput("record collection is empty, no row to inspect".to_string())
    })?;

    let columns = first
        .iter()
        .map(|(name, value)| Column::new(name, detect_value(value)))
        .collect::<Vec<_>>();

    debug!(
        columns = columns.len(),
        rows = records.len(),
        "detected field types"
    );

    Ok(Schema::new(columns))
}

/// Field type implied by a single value
///
/// An empty list counts as a list of numbers.
pub fn detect_value(value: &Value) -> FieldType {
    match value {
        Value::Date(_) => FieldType::Date,
        Value::List(items) if items.iter().all(Value::is_numeric) => FieldType::NumberList,
        Value::List(items) if items.iter().all(|v| matches!(v, Value::String(_))) => {
            FieldType::StringList
        }
        _ => FieldType::Scalar,
    }
}

/// Restrict a schema to a subset of columns
pub fn project<S: AsRef<str>>(schema: &Schema, names: &[S]) -> Result<Schema, CodecError> {
    schema
        .project(names)
        .map_err(|name| CodecError::MalformedInput(format!("unknown column: {}", name)))
}
