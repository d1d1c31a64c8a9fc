//! Editable cells back to typed records

use gridcodec_types::{parse_date, FieldType, Record, Schema, Value};
use tracing::{debug, warn};

use crate::{CellError, CodecError, CodecOptions, FlatRecord, ListStyle, LIST_SEPARATOR};

/// Rebuild typed records from grid rows.
///
/// Rows whose every cell is the empty string are placeholders and are
/// dropped. The first parse failure aborts with its row and field; callers
/// that want to keep going use [`reconstruct_lossy`].
pub fn reconstruct(
    rows: &[FlatRecord],
    schema: &Schema,
    options: &CodecOptions,
) -> Result<Vec<Record>, CodecError> {
    let mut records = Vec::with_capacity(rows.len());

    for (row, flat) in rows.iter().enumerate() {
        if flat.is_blank() {
            debug!(row, "skipping blank row");
            continue;
        }
        check_width(row, flat, schema)?;

        let mut record = Record::new();
        for (column, cell) in schema.columns.iter().zip(&flat.cells) {
            let value = reconstruct_value(cell, column.field_type, options)
                .map_err(|e| e.at(row, &column.name))?;
            record.insert(column.name.as_str(), value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Like [`reconstruct`], but a cell that fails to parse keeps its edited
/// text and the failure is collected instead of returned.
pub fn reconstruct_lossy(
    rows: &[FlatRecord],
    schema: &Schema,
    options: &CodecOptions,
) -> (Vec<Record>, Vec<CodecError>) {
    let mut records = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (row, flat) in rows.iter().enumerate() {
        if flat.is_blank() {
            continue;
        }
        if let Err(e) = check_width(row, flat, schema) {
            errors.push(e);
            continue;
        }

        let mut record = Record::new();
        for (column, cell) in schema.columns.iter().zip(&flat.cells) {
            let value = match reconstruct_value(cell, column.field_type, options) {
                Ok(value) => value,
                Err(e) => {
                    let e = e.at(row, &column.name);
                    warn!(error = %e, "keeping unparsed cell text");
                    errors.push(e);
                    cell.clone()
                }
            };
            record.insert(column.name.as_str(), value);
        }
        records.push(record);
    }

    (records, errors)
}

fn check_width(row: usize, flat: &FlatRecord, schema: &Schema) -> Result<(), CodecError> {
    if flat.len() != schema.len() {
        return Err(CodecError::MalformedInput(format!(
            "row {} has {} cells, expected {}",
            row,
            flat.len(),
            schema.len()
        )));
    }
    Ok(())
}

/// Parse a single cell for a column of `field_type`
pub fn reconstruct_value(
    cell: &Value,
    field_type: FieldType,
    options: &CodecOptions,
) -> Result<Value, CellError> {
    match (field_type, cell) {
        (_, Value::Null) | (FieldType::Scalar, _) => Ok(cell.clone()),

        (FieldType::Date, Value::Date(_)) => Ok(cell.clone()),
        // A cleared date cell is unset, not malformed
        (FieldType::Date, Value::String(s)) if s.is_empty() => Ok(Value::Null),
        (FieldType::Date, Value::String(s)) => parse_date(s)
            .map(Value::Date)
            .ok_or_else(|| CellError::InvalidDate(s.clone())),
        (FieldType::Date, other) => Err(CellError::InvalidDate(other.to_string())),

        (_, Value::String(s)) => parse_list(s, field_type, options.list_style),
        (_, Value::List(items)) => {
            // Already typed, as some grids hand back arrays untouched
            for item in items {
                check_element(item, field_type)?;
            }
            Ok(cell.clone())
        }
        (_, other) => Err(CellError::InvalidListElement(other.to_string())),
    }
}

fn parse_list(text: &str, field_type: FieldType, style: ListStyle) -> Result<Value, CellError> {
    match style {
        ListStyle::CommaSpace => {
            if text.is_empty() {
                return Ok(Value::List(Vec::new()));
            }
            let items = text
                .split(LIST_SEPARATOR)
                .map(|token| match field_type {
                    FieldType::NumberList => parse_number(token),
                    _ => Ok(Value::String(token.to_string())),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(items))
        }
        ListStyle::JsonArray => {
            let json: serde_json::Value = serde_json::from_str(text)
                .map_err(|_| CellError::InvalidListElement(text.to_string()))?;
            let serde_json::Value::Array(elements) = json else {
                return Err(CellError::InvalidListElement(text.to_string()));
            };

            let items = elements
                .into_iter()
                .map(|element| {
                    let item = Value::from_json(element.clone(), false)
                        .map_err(|_| CellError::InvalidListElement(element.to_string()))?;
                    check_element(&item, field_type)?;
                    Ok(item)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(items))
        }
    }
}

fn check_element(item: &Value, field_type: FieldType) -> Result<(), CellError> {
    let fits = match field_type {
        FieldType::NumberList => item.is_numeric(),
        _ => matches!(item, Value::String(_)),
    };
    if fits {
        Ok(())
    } else {
        Err(CellError::InvalidListElement(item.to_string()))
    }
}

/// Integer-looking tokens stay integers so integer lists round-trip;
/// everything else is read as `f64`.
fn parse_number(token: &str) -> Result<Value, CellError> {
    let trimmed = token.trim();
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return Ok(Value::Int(i));
        }
    }

    trimmed
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| CellError::InvalidListElement(token.to_string()))
}
