use gridcodec_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Non-fatal: the table is left as it was
    #[error("cannot remove last remaining row")]
    EmptyCollectionViolation,

    #[error("Row {row} out of range ({rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}
