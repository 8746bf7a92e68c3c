//! In-memory tabular data engine
//!
//! [`DataTable`] owns the row store together with the transient sort and
//! filter state of a table page. The visible rows are derived on every call
//! to [`DataTable::visible_rows`]: the store is sorted, then filtered. Nothing
//! is cached between calls.
//!
//! ```
//! use dashboard_lib::model::{Record, SortKey};
//! use dashboard_lib::table::DataTable;
//!
//! let mut table = DataTable::new(vec![Record::new(1, "Ann", "ann@x.com")]);
//! let added = table.submit_new_record("Bob", "bob@x.com").unwrap();
//! assert_eq!(added.id, 2);
//!
//! table.request_sort(SortKey::Name);
//! table.set_filter_text("b");
//! assert_eq!(table.visible_rows(), vec![added]);
//! ```

mod filter;
mod gateway;
mod sort;
mod store;

pub use filter::filter_rows;
pub use gateway::{validate_candidate, MutationGateway};
pub use sort::sort_rows;
pub use store::RowStore;

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::error::SubmitError;
use crate::model::{Record, SortConfig, SortKey};

/// The add-record form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub email: String,
}

impl RecordDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }
}

/// Row store plus sort, filter and add-record state of one table.
#[derive(Debug, Default)]
pub struct DataTable {
    rows: RowStore,
    sort: SortConfig,
    filter: String,
    draft: RecordDraft,
    gateway: MutationGateway,
}

impl DataTable {
    /// Creates a table over `rows`, unsorted and unfiltered.
    pub fn new(rows: impl Into<RowStore>) -> Self {
        Self {
            rows: rows.into(),
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Row store
    // -------------------------------------------------------------------------

    /// Replaces the whole store.
    pub fn set_rows(&mut self, rows: impl Into<RowStore>) {
        self.rows = rows.into();
        debug!("Row store replaced ({} rows)", self.rows.len());
    }

    /// Returns a snapshot of the store in its own order.
    pub fn rows(&self) -> Arc<[Record]> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // -------------------------------------------------------------------------
    // Sort and filter
    // -------------------------------------------------------------------------

    pub fn sort_config(&self) -> SortConfig {
        self.sort
    }

    /// Sorts by `key`, flipping the direction if `key` is already sorted
    /// ascending. Returns the new configuration.
    pub fn request_sort(&mut self, key: SortKey) -> SortConfig {
        self.sort = self.sort.toggled(key);
        debug!("Sort set to {} {}", key, self.sort.direction.as_str());
        self.sort
    }

    /// Removes the sort, restoring store order.
    pub fn clear_sort(&mut self) {
        self.sort = SortConfig::default();
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        debug!("Filter set to {:?}", self.filter);
    }

    /// The rows to display: the store sorted, then filtered.
    pub fn visible_rows(&self) -> Vec<Record> {
        let sorted = sort_rows(&self.rows, self.sort);
        filter_rows(&sorted, &self.filter)
    }

    // -------------------------------------------------------------------------
    // Add record
    // -------------------------------------------------------------------------

    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RecordDraft {
        &mut self.draft
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.gateway.is_submitting()
    }

    /// Validates and appends a new record.
    ///
    /// On success the store is swapped for one holding the new record and the
    /// draft is cleared. On failure nothing changes.
    pub fn submit_new_record(&mut self, name: &str, email: &str) -> Result<Record, SubmitError> {
        match self.gateway.submit(&self.rows, name, email) {
            Ok((rows, record)) => {
                self.rows = rows;
                self.draft.clear();
                info!("Added record {} ({})", record.id, record.email);
                Ok(record)
            }
            Err(err @ SubmitError::Unexpected(_)) => {
                error!("Submission error: {}", err);
                Err(err)
            }
            Err(err) => {
                warn!("Submission rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Submits the current draft. The draft is kept on failure.
    pub fn submit_draft(&mut self) -> Result<Record, SubmitError> {
        let RecordDraft { name, email } = self.draft.clone();
        self.submit_new_record(&name, &email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortDirection;

    #[test]
    fn test_failed_submit_keeps_draft() {
        let mut table = DataTable::new(vec![Record::new(1, "Ann", "ann@x.com")]);
        *table.draft_mut() = RecordDraft::new("Bob", "ann@x.com");

        assert!(table.submit_draft().is_err());
        assert_eq!(table.draft(), &RecordDraft::new("Bob", "ann@x.com"));
    }

    #[test]
    fn test_successful_submit_clears_draft() {
        let mut table = DataTable::default();
        *table.draft_mut() = RecordDraft::new("Ann", "ann@x.com");

        let record = table.submit_draft().unwrap();
        assert_eq!(record.id, 1);
        assert!(table.draft().is_blank());
    }

    #[test]
    fn test_request_sort_returns_config() {
        let mut table = DataTable::default();
        assert_eq!(
            table.request_sort(SortKey::Email),
            SortConfig::by(SortKey::Email, SortDirection::Asc)
        );
        assert_eq!(
            table.request_sort(SortKey::Email),
            SortConfig::by(SortKey::Email, SortDirection::Desc)
        );
        table.clear_sort();
        assert_eq!(table.sort_config(), SortConfig::default());
    }

    #[test]
    fn test_visible_rows_sorts_before_filtering() {
        let mut table = DataTable::new(vec![
            Record::new(1, "Bea", "bea@x.com"),
            Record::new(2, "Abe", "abe@x.com"),
            Record::new(3, "Cy", "cy@y.com"),
        ]);
        table.request_sort(SortKey::Name);
        table.set_filter_text("x.com");

        let names: Vec<String> = table.visible_rows().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Abe", "Bea"]);
    }
}
