//! Typed records to editable cells

use gridcodec_types::{FieldType, Record, Schema, Value, DATE_FORMAT};
use serde::Serialize;
use tracing::{trace, warn};

use crate::{CellError, CodecError, CodecOptions, FlattenMode, ListStyle, LIST_SEPARATOR};

/// One grid row, cells aligned with the schema columns
///
/// Date and list cells hold `Value::String`; scalar cells keep their value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatRecord {
    pub cells: Vec<Value>,
}

impl FlatRecord {
    pub fn new(cells: Vec<Value>) -> Self {
        Self { cells }
    }

    /// Placeholder row of empty strings
    pub fn blank(width: usize) -> Self {
        Self::new(vec![Value::String(String::new()); width])
    }

    /// Row whose every cell is explicitly unset
    pub fn unset(width: usize) -> Self {
        Self::new(vec![Value::Null; width])
    }

    pub fn get(&self, column: usize) -> Option<&Value> {
        self.cells.get(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell is the empty string
    pub fn is_blank(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(Value::is_blank)
    }
}

/// The 2-D surface handed to a grid widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatTable {
    pub columns: Vec<String>,
    pub rows: Vec<FlatRecord>,
}

impl FlatTable {
    pub fn new(schema: &Schema, rows: Vec<FlatRecord>) -> Self {
        Self {
            columns: schema.names(),
            rows,
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

/// Flatten every record against `schema`.
///
/// Fields missing from a record become `Null` cells; fields the schema does
/// not know about are skipped.
pub fn flatten(
    records: &[Record],
    schema: &Schema,
    options: &CodecOptions,
) -> Result<Vec<FlatRecord>, CodecError> {
    let mut rows = Vec::with_capacity(records.len());

    for (row, record) in records.iter().enumerate() {
        if let Some(extra) = record.names().find(|name| schema.find_column(name).is_none()) {
            warn!(row, field = extra, "field not in schema, skipped");
        }

        let cells = schema
            .columns
            .iter()
            .map(|column| match record.get(&column.name) {
                Some(value) => flatten_value(value, column.field_type, options)
                    .map_err(|e| e.at(row, &column.name)),
                None => Ok(Value::Null),
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(FlatRecord::new(cells));
    }

    trace!(rows = rows.len(), "flattened records");
    Ok(rows)
}

/// Flatten a single value for a column of `field_type`
pub fn flatten_value(
    value: &Value,
    field_type: FieldType,
    options: &CodecOptions,
) -> Result<Value, CellError> {
    if matches!(value, Value::Null) {
        return Ok(Value::Null);
    }

    match (field_type, value) {
        (FieldType::Scalar, v) => Ok(v.clone()),
        (FieldType::Date, Value::Date(d)) => Ok(Value::String(d.format(DATE_FORMAT).to_string())),
        (FieldType::NumberList | FieldType::StringList, Value::List(items)) => {
            let items = items
                .iter()
                .map(|item| list_element(item, field_type, options))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::String(join_list(&items, options.list_style)))
        }
        (expected, other) => coerce(other, expected, options.flatten_mode),
    }
}

fn list_element(item: &Value, field_type: FieldType, options: &CodecOptions) -> Result<Value, CellError> {
    let fits = match field_type {
        FieldType::NumberList => item.is_numeric(),
        _ => matches!(item, Value::String(_)),
    };

    if fits {
        // A separator inside an element would split it on read-back
        let splits = options.list_style == ListStyle::CommaSpace
            && options.flatten_mode == FlattenMode::Strict
            && matches!(item, Value::String(s) if s.contains(LIST_SEPARATOR));
        if splits {
            return Err(CellError::TypeMismatch {
                expected: field_type,
                found: format!("element {:?} containing the list separator", item.to_string()),
            });
        }
        return Ok(item.clone());
    }

    match options.flatten_mode {
        FlattenMode::Strict => Err(CellError::TypeMismatch {
            expected: field_type,
            found: format!("list element of type {}", item.kind()),
        }),
        FlattenMode::Lenient => Ok(Value::String(item.to_string())),
    }
}

fn coerce(value: &Value, expected: FieldType, mode: FlattenMode) -> Result<Value, CellError> {
    match mode {
        FlattenMode::Strict => Err(CellError::TypeMismatch {
            expected,
            found: value.kind().to_string(),
        }),
        FlattenMode::Lenient => Ok(Value::String(value.to_string())),
    }
}

fn join_list(items: &[Value], style: ListStyle) -> String {
    match style {
        ListStyle::CommaSpace => items
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        ListStyle::JsonArray => {
            serde_json::Value::Array(items.iter().map(Value::to_json).collect()).to_string()
        }
    }
}
