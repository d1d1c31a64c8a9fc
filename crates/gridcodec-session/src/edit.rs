//! Cell edits

use gridcodec_codec::{flatten_value, reconstruct_value, CodecError, FieldType, Value};
use tracing::{debug, warn};

use crate::{ColumnKey, EditOutcome, EditPolicy, GridSession, SessionError};

impl GridSession {
    /// Store an edited cell value.
    ///
    /// Scalar columns take the value as given. Date and list columns must
    /// hold text that parses back into their type; when it does not, the
    /// session's [`EditPolicy`] decides what happens to the cell.
    pub fn edit_cell(
        &mut self,
        row: usize,
        column: &ColumnKey,
        value: Value,
    ) -> Result<EditOutcome, SessionError> {
        self.check_row(row)?;
        let col = self.column_index(column)?;
        let width = self.rows[row].len();
        if width != self.schema.len() {
            return Err(CodecError::MalformedInput(format!(
                "row {} has {} cells, expected {}",
                row,
                width,
                self.schema.len()
            ))
            .into());
        }
        let field = &self.schema.columns[col];

        let checked = match field.field_type {
            FieldType::Scalar => Ok(value),
            field_type => self.normalize(value, field_type),
        };

        let outcome = match checked {
            Ok(cell) => {
                self.rows[row].cells[col] = cell;
                EditOutcome::Applied
            }
            Err((text, cell_err)) => {
                let err = cell_err.at(row, &field.name);
                match self.options.edit_policy {
                    EditPolicy::Reject => return Err(err.into()),
                    EditPolicy::Revert => {
                        warn!(error = %err, "edit reverted");
                        EditOutcome::Reverted(err)
                    }
                    EditPolicy::KeepText => {
                        warn!(error = %err, "edit kept as text");
                        self.rows[row].cells[col] = text;
                        EditOutcome::KeptText(err)
                    }
                }
            }
        };

        debug!(row, column = col, outcome = ?outcome, "cell edited");
        Ok(outcome)
    }

    /// Bring an edit for a date or list column into cell form and check it
    /// parses. On failure the text form is handed back with the error.
    fn normalize(
        &self,
        value: Value,
        field_type: FieldType,
    ) -> Result<Value, (Value, gridcodec_codec::CellError)> {
        let codec = &self.options.codec;

        // A date picker or an array-aware grid may send typed values
        let cell = match value {
            Value::String(_) | Value::Null => value,
            typed => match flatten_value(&typed, field_type, codec) {
                Ok(cell) => cell,
                Err(e) => return Err((Value::String(typed.to_string()), e)),
            },
        };

        match reconstruct_value(&cell, field_type, codec) {
            Ok(_) => Ok(cell),
            Err(e) => Err((cell, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ColumnKey, EditOutcome, EditPolicy, GridSession, SessionError, SessionOptions};
    use chrono::NaiveDate;
    use gridcodec_codec::{CodecError, Column, FieldType, FlatRecord, Record, Schema, Value};

    fn session(policy: EditPolicy) -> GridSession {
        let records = vec![Record::new()
            .with("name", "Alice")
            .with("birthday", NaiveDate::from_ymd_opt(1993, 1, 15).unwrap())
            .with("scores", vec![85.5, 92.3])];
        GridSession::new(&records, SessionOptions::default().with_edit_policy(policy)).unwrap()
    }

    #[test]
    fn test_valid_date_edit() {
        let mut s = session(EditPolicy::Revert);
        let outcome = s.edit_cell(0, &"birthday".into(), Value::from("1993-02-01")).unwrap();
        assert_eq!(outcome, EditOutcome::Applied);
        assert_eq!(
            s.updated_data().unwrap()[0].get("birthday"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(1993, 2, 1).unwrap()))
        );
    }

    #[test]
    fn test_typed_date_edit_is_flattened() {
        let mut s = session(EditPolicy::Reject);
        let picked = Value::Date(NaiveDate::from_ymd_opt(2000, 6, 1).unwrap());
        s.edit_cell(0, &ColumnKey::Index(1), picked).unwrap();
        assert_eq!(s.cell(0, 1), Some(&Value::from("2000-06-01")));
    }

    #[test]
    fn test_invalid_date_reverts() {
        let mut s = session(EditPolicy::Revert);
        let outcome = s.edit_cell(0, &"birthday".into(), Value::from("not-a-date")).unwrap();
        assert!(matches!(outcome, EditOutcome::Reverted(CodecError::InvalidDate { .. })));
        assert_eq!(s.cell(0, 1), Some(&Value::from("1993-01-15")));
    }

    #[test]
    fn test_invalid_date_kept_as_text() {
        let mut s = session(EditPolicy::KeepText);
        let outcome = s.edit_cell(0, &"birthday".into(), Value::from("not-a-date")).unwrap();
        assert!(matches!(outcome, EditOutcome::KeptText(_)));
        assert_eq!(s.cell(0, 1), Some(&Value::from("not-a-date")));

        assert!(s.updated_data().is_err());
        let (records, errors) = s.updated_data_lossy();
        assert_eq!(records[0].get("birthday"), Some(&Value::from("not-a-date")));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_invalid_list_rejected() {
        let mut s = session(EditPolicy::Reject);
        let err = s.edit_cell(0, &"scores".into(), Value::from("85.5, lots")).unwrap_err();
        assert_eq!(
            err,
            SessionError::Codec(CodecError::InvalidListElement {
                row: 0,
                field: "scores".to_string(),
                token: "lots".to_string(),
            })
        );
        assert_eq!(s.cell(0, 2), Some(&Value::from("85.5, 92.3")));
    }

    #[test]
    fn test_scalar_edit_passes_through() {
        let mut s = session(EditPolicy::Reject);
        s.edit_cell(0, &ColumnKey::Index(0), Value::Int(7)).unwrap();
        assert_eq!(s.cell(0, 0), Some(&Value::Int(7)));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let schema = Schema::new(vec![
            Column::new("a", FieldType::Scalar),
            Column::new("b", FieldType::Scalar),
        ]);
        let rows = vec![FlatRecord::new(vec![Value::from("x")])];
        let mut s = GridSession::from_parts(schema, rows, SessionOptions::default());

        let err = s.edit_cell(0, &"b".into(), Value::from("z")).unwrap_err();
        assert!(matches!(err, SessionError::Codec(CodecError::MalformedInput(_))));
        assert_eq!(s.rows()[0].cells, vec![Value::from("x")]);
    }

    #[test]
    fn test_clearing_a_date() {
        let mut s = session(EditPolicy::Reject);
        let outcome = s.edit_cell(0, &"birthday".into(), Value::from("")).unwrap();
        assert_eq!(outcome, EditOutcome::Applied);
        assert_eq!(s.updated_data().unwrap()[0].get("birthday"), Some(&Value::Null));
    }

    #[test]
    fn test_out_of_range_targets() {
        let mut s = session(EditPolicy::Revert);
        assert_eq!(
            s.edit_cell(3, &ColumnKey::Index(0), Value::Null),
            Err(SessionError::RowOutOfRange { row: 3, rows: 1 })
        );
        assert_eq!(
            s.edit_cell(0, &"city".into(), Value::Null),
            Err(SessionError::UnknownColumn("city".to_string()))
        );
    }
}
