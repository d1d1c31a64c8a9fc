//! gridcodec session - one editable grid's state and its event handlers
//!
//! A [`GridSession`] owns the flattened table, the schema fixed at load
//! time and the current row selection. It holds no reference to any
//! widget: the display surface sends [`GridEvent`]s and reads the
//! [`FlatTable`] and the reconstructed records back.

use std::collections::BTreeSet;

use gridcodec_codec::{
    detect, flatten, project, reconstruct, reconstruct_lossy, CodecError, FlatRecord, FlatTable,
    Record, Schema, Value,
};
use tracing::info;

mod edit;
mod error;
mod event;
mod options;
mod rows;

pub use error::SessionError;
pub use event::{ColumnKey, EditOutcome, EventOutcome, GridEvent};
pub use options::{EditPolicy, SessionOptions};

#[derive(Debug, Clone)]
pub struct GridSession {
    schema: Schema,
    rows: Vec<FlatRecord>,
    selection: BTreeSet<usize>,
    options: SessionOptions,
}

impl GridSession {
    /// Detect field types from the first record and flatten the collection
    pub fn new(records: &[Record], options: SessionOptions) -> Result<Self, SessionError> {
        let schema = detect(records)?;
        Self::with_schema(records, schema, options)
    }

    /// Like [`GridSession::new`], showing only `columns` in the given order
    pub fn with_columns<S: AsRef<str>>(
        records: &[Record],
        columns: &[S],
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        let schema = project(&detect(records)?, columns)?;
        Self::with_schema(records, schema, options)
    }

    fn with_schema(
        records: &[Record],
        schema: Schema,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        let rows = flatten(records, &schema, &options.codec)?;
        info!(
            rows = rows.len(),
            columns = schema.len(),
            "grid session loaded"
        );
        Ok(Self::from_parts(schema, rows, options))
    }

    /// Session over an already flattened table, which may be empty
    pub fn from_parts(schema: Schema, rows: Vec<FlatRecord>, options: SessionOptions) -> Self {
        Self {
            schema,
            rows,
            selection: BTreeSet::new(),
            options,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn columns(&self) -> Vec<String> {
        self.schema.names()
    }

    pub fn rows(&self) -> &[FlatRecord] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    /// Snapshot of what the grid should display
    pub fn table(&self) -> FlatTable {
        FlatTable::new(&self.schema, self.rows.clone())
    }

    /// Typed records for the current table; fails on the first cell that does not parse
    pub fn updated_data(&self) -> Result<Vec<Record>, SessionError> {
        Ok(reconstruct(&self.rows, &self.schema, &self.options.codec)?)
    }

    /// Typed records, with unparseable cells left as their text
    pub fn updated_data_lossy(&self) -> (Vec<Record>, Vec<CodecError>) {
        reconstruct_lossy(&self.rows, &self.schema, &self.options.codec)
    }

    fn column_index(&self, column: &ColumnKey) -> Result<usize, SessionError> {
        match column {
            ColumnKey::Index(i) if *i < self.schema.len() => Ok(*i),
            ColumnKey::Index(i) => Err(SessionError::UnknownColumn(i.to_string())),
            ColumnKey::Name(name) => self
                .schema
                .position(name)
                .ok_or_else(|| SessionError::UnknownColumn(name.clone())),
        }
    }

    fn check_row(&self, row: usize) -> Result<(), SessionError> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(SessionError::RowOutOfRange {
                row,
                rows: self.rows.len(),
            })
        }
    }
}
