//! Grid events and their synchronous dispatch

use gridcodec_codec::{CodecError, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{GridSession, SessionError};

/// A column addressed the way a grid reports it: by position or by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnKey {
    Index(usize),
    Name(String),
}

impl From<usize> for ColumnKey {
    fn from(i: usize) -> Self {
        ColumnKey::Index(i)
    }
}

impl From<&str> for ColumnKey {
    fn from(name: &str) -> Self {
        ColumnKey::Name(name.to_string())
    }
}

/// Notification from the display surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridEvent {
    CellEdited {
        row: usize,
        column: ColumnKey,
        value: Value,
    },
    /// Duplicate the last row
    RowAdded,
    /// `None` drops the last row, `Some` removes that row
    RowRemoved {
        #[serde(default)]
        index: Option<usize>,
    },
    RowsSelected {
        rows: Vec<usize>,
    },
    SelectionRemoved,
    /// Placeholder row of empty strings, dropped on read-back
    BlankRowAppended,
}

/// Result of a cell edit that did not fail outright
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Applied,
    /// The cell kept its previous text
    Reverted(CodecError),
    /// The cell holds text that will not parse on read-back
    KeptText(CodecError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Edited(EditOutcome),
    RowsAdded(usize),
    RowsRemoved(usize),
    SelectionChanged(usize),
}

impl GridSession {
    /// Handle one event against the session's table
    pub fn apply(&mut self, event: GridEvent) -> Result<EventOutcome, SessionError> {
        debug!(event = ?event, rows = self.row_count(), "applying grid event");

        let result = match event {
            GridEvent::CellEdited { row, column, value } => {
                self.edit_cell(row, &column, value).map(EventOutcome::Edited)
            }
            GridEvent::RowAdded => {
                self.duplicate_last();
                Ok(EventOutcome::RowsAdded(1))
            }
            GridEvent::RowRemoved { index: None } => {
                self.drop_last().map(|()| EventOutcome::RowsRemoved(1))
            }
            GridEvent::RowRemoved { index: Some(index) } => {
                if index >= self.row_count() {
                    Err(SessionError::RowOutOfRange {
                        row: index,
                        rows: self.row_count(),
                    })
                } else {
                    Ok(EventOutcome::RowsRemoved(self.remove_rows([index])))
                }
            }
            GridEvent::RowsSelected { rows } => {
                self.select_rows(rows);
                Ok(EventOutcome::SelectionChanged(self.selection().len()))
            }
            GridEvent::SelectionRemoved => Ok(EventOutcome::RowsRemoved(self.remove_selected())),
            GridEvent::BlankRowAppended => {
                self.append_blank();
                Ok(EventOutcome::RowsAdded(1))
            }
        };

        if let Err(ref e) = result {
            warn!(error = %e, "grid event refused");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event: GridEvent =
            serde_json::from_str(r#"{"event": "cell_edited", "row": 0, "column": "birthday", "value": "1993-02-01"}"#)
                .unwrap();
        assert_eq!(
            event,
            GridEvent::CellEdited {
                row: 0,
                column: ColumnKey::Name("birthday".to_string()),
                value: Value::from("1993-02-01"),
            }
        );

        let event: GridEvent = serde_json::from_str(r#"{"event": "cell_edited", "row": 2, "column": 1, "value": 40}"#).unwrap();
        assert!(matches!(event, GridEvent::CellEdited { column: ColumnKey::Index(1), value: Value::Int(40), .. }));

        let event: GridEvent = serde_json::from_str(r#"{"event": "row_removed"}"#).unwrap();
        assert_eq!(event, GridEvent::RowRemoved { index: None });

        let event: GridEvent = serde_json::from_str(r#"{"event": "rows_selected", "rows": [0, 2]}"#).unwrap();
        assert_eq!(event, GridEvent::RowsSelected { rows: vec![0, 2] });
    }
}
