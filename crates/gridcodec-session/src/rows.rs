//! Row mutation helpers

use std::collections::BTreeSet;

use gridcodec_codec::FlatRecord;
use tracing::{debug, warn};

use crate::{GridSession, SessionError};

impl GridSession {
    /// Append a copy of the last row, or a row of unset cells when the table is empty
    pub fn duplicate_last(&mut self) {
        let row = match self.rows.last() {
            Some(last) => last.clone(),
            None => FlatRecord::unset(self.schema.len()),
        };
        self.rows.push(row);
        debug!(rows = self.rows.len(), "row added");
    }

    /// Remove the last row. The table never becomes empty this way.
    pub fn drop_last(&mut self) -> Result<(), SessionError> {
        if self.rows.len() <= 1 {
            return Err(SessionError::EmptyCollectionViolation);
        }
        self.rows.pop();
        self.prune_selection();
        debug!(rows = self.rows.len(), "row removed");
        Ok(())
    }

    /// Remove rows by their position before removal. Returns how many went.
    ///
    /// Unlike [`GridSession::drop_last`] this may empty the table.
    pub fn remove_rows(&mut self, indices: impl IntoIterator<Item = usize>) -> usize {
        let doomed = indices.into_iter().collect::<BTreeSet<_>>();
        let before = self.rows.len();

        if let Some(&past_end) = doomed.range(before..).next() {
            warn!(index = past_end, rows = before, "ignoring out-of-range row index");
        }

        let mut index = 0;
        self.rows.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });

        // Positions shifted, so any selection is stale
        self.selection.clear();

        let removed = before - self.rows.len();
        debug!(removed, rows = self.rows.len(), "rows removed");
        removed
    }

    /// Replace the selection. Indices past the end are dropped.
    pub fn select_rows(&mut self, rows: impl IntoIterator<Item = usize>) {
        self.selection = rows.into_iter().collect();
        self.prune_selection();
    }

    pub fn remove_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.selection);
        self.remove_rows(selected)
    }

    /// Append a placeholder row of empty strings
    pub fn append_blank(&mut self) {
        self.rows.push(FlatRecord::blank(self.schema.len()));
    }

    fn prune_selection(&mut self) {
        let rows = self.rows.len();
        self.selection.retain(|&i| i < rows);
    }
}
