use gridcodec_types::FieldType;
use thiserror::Error;

/// Failure converting a single cell, before it is tied to a row and field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    #[error("expected {expected}, got {found}")]
    TypeMismatch { expected: FieldType, found: String },

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid list element {0:?}")]
    InvalidListElement(String),
}

impl CellError {
    /// Attach the row and field the cell came from
    pub fn at(self, row: usize, field: &str) -> CodecError {
        let field = field.to_string();
        match self {
            CellError::TypeMismatch { expected, found } => CodecError::TypeMismatch {
                row,
                field,
                expected,
                found,
            },
            CellError::InvalidDate(value) => CodecError::InvalidDate { row, field, value },
            CellError::InvalidListElement(token) => {
                CodecError::InvalidListElement { row, field, token }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Type mismatch in row {row}, field {field}: expected {expected}, got {found}")]
    TypeMismatch {
        row: usize,
        field: String,
        expected: FieldType,
        found: String,
    },

    #[error("Invalid date {value:?} in row {row}, field {field}: expected YYYY-MM-DD")]
    InvalidDate {
        row: usize,
        field: String,
        value: String,
    },

    #[error("Invalid list element {token:?} in row {row}, field {field}")]
    InvalidListElement {
        row: usize,
        field: String,
        token: String,
    },
}

impl CodecError {
    /// Reconstruction-time parse failures, as opposed to shape errors
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            CodecError::InvalidDate { .. } | CodecError::InvalidListElement { .. }
        )
    }
}
