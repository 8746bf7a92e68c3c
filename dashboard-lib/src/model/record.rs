//! A single table row

use std::cmp::Ordering;

use super::SortKey;

/// A row of tabular data.
///
/// Records are only created by the add-record gateway (or supplied wholesale
/// through [`DataTable::set_rows`](crate::table::DataTable::set_rows)) and are
/// never edited afterwards.
///
/// # Example
///
/// ```
/// use dashboard_lib::model::Record;
///
/// let record = Record::new(1, "Ann", "ann@x.com");
/// assert!(record.matches("ANN"));
/// assert!(record.matches("x.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Unique, monotonically assigned identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Email address, unique within a store.
    pub email: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// String form of every declared field, in column order.
    pub fn field_strings(&self) -> [String; 3] {
        [self.id.to_string(), self.name.clone(), self.email.clone()]
    }

    /// String form of a single field.
    pub fn field_string(&self, key: SortKey) -> String {
        match key {
            SortKey::Id => self.id.to_string(),
            SortKey::Name => self.name.clone(),
            SortKey::Email => self.email.clone(),
        }
    }

    /// Compares two records by the given field only.
    pub fn cmp_by(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Id => self.id.cmp(&other.id),
            SortKey::Name => self.name.cmp(&other.name),
            SortKey::Email => self.email.cmp(&other.email),
        }
    }

    /// Returns `true` if any field contains `text`, ignoring case.
    ///
    /// An empty `text` matches every record.
    pub fn matches(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.matches_lowercase(&needle)
    }

    /// Same as [`matches`](Self::matches) with an already lowercased needle.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.field_strings()
            .iter()
            .any(|value| value.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_every_field() {
        let record = Record::new(42, "Ann Lee", "ann@x.com");
        assert!(record.matches("42"));
        assert!(record.matches("lee"));
        assert!(record.matches("@X.COM"));
        assert!(!record.matches("bob"));
    }

    #[test]
    fn test_empty_text_matches() {
        let record = Record::new(1, "Ann", "ann@x.com");
        assert!(record.matches(""));
    }

    #[test]
    fn test_cmp_by_id_is_numeric() {
        let a = Record::new(9, "a", "a@x.com");
        let b = Record::new(10, "b", "b@x.com");
        assert_eq!(a.cmp_by(&b, SortKey::Id), Ordering::Less);
        // "9" > "10" as strings, but ids compare numerically
        assert_eq!(
            a.field_string(SortKey::Id).cmp(&b.field_string(SortKey::Id)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_cmp_by_name_is_lexicographic() {
        let a = Record::new(1, "Zed", "z@x.com");
        let b = Record::new(2, "ann", "a@x.com");
        // Uppercase sorts before lowercase
        assert_eq!(a.cmp_by(&b, SortKey::Name), Ordering::Less);
    }
}
