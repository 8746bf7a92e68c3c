//! Copy-on-write row storage.

use std::ops::Deref;
use std::sync::Arc;

use crate::model::Record;

/// The authoritative, ordered collection of records.
///
/// The rows live behind an `Arc<[Record]>`. Updates never touch the existing
/// slice: they build a new one and swap the reference, so a snapshot taken
/// before an update keeps observing the old, complete sequence.
#[derive(Debug, Clone)]
pub struct RowStore {
    rows: Arc<[Record]>,
}

impl RowStore {
    /// Creates a store holding `rows` in the given order.
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows: rows.into() }
    }

    /// Returns a shared snapshot of the current rows.
    pub fn snapshot(&self) -> Arc<[Record]> {
        Arc::clone(&self.rows)
    }

    /// Returns the rows as a slice.
    pub fn as_slice(&self) -> &[Record] {
        &self.rows
    }

    /// Returns `true` if some record already uses `email` (exact match).
    pub fn contains_email(&self, email: &str) -> bool {
        self.rows.iter().any(|record| record.email == email)
    }

    /// The id the next appended record receives.
    ///
    /// One past the largest id in the store, or `1` for an empty store.
    /// `None` if the largest id is already `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        self.rows
            .iter()
            .map(|record| record.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    /// Returns a new store with `record` appended.
    pub fn appended(&self, record: Record) -> Self {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.extend_from_slice(&self.rows);
        rows.push(record);
        Self::new(rows)
    }
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for RowStore {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

impl From<Vec<Record>> for RowStore {
    fn from(rows: Vec<Record>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Record> for RowStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(ids: &[u64]) -> RowStore {
        ids.iter()
            .map(|&id| Record::new(id, format!("user{id}"), format!("user{id}@x.com")))
            .collect()
    }

    #[test]
    fn test_next_id_after_gaps() {
        assert_eq!(store(&[1, 3, 4]).next_id(), Some(5));
    }

    #[test]
    fn test_next_id_ignores_order() {
        assert_eq!(store(&[7, 2, 5]).next_id(), Some(8));
    }

    #[test]
    fn test_next_id_empty_store() {
        assert_eq!(RowStore::default().next_id(), Some(1));
    }

    #[test]
    fn test_next_id_exhausted() {
        assert_eq!(store(&[u64::MAX]).next_id(), None);
    }

    #[test]
    fn test_appended_leaves_snapshot_untouched() {
        let original = store(&[1, 2]);
        let snapshot = original.snapshot();

        let updated = original.appended(Record::new(3, "Cara", "cara@x.com"));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(original.len(), 2);
        assert_eq!(updated.len(), 3);
        assert_eq!(updated[2].name, "Cara");
    }

    #[test]
    fn test_contains_email_is_exact() {
        let store = RowStore::new(vec![Record::new(1, "Ann", "ann@x.com")]);
        assert!(store.contains_email("ann@x.com"));
        assert!(!store.contains_email("ANN@x.com"));
        assert!(!store.contains_email(" ann@x.com"));
    }
}
