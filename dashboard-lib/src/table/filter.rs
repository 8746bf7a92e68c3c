//! Filter stage.

use crate::model::Record;

/// Returns the records where at least one field contains `text`, ignoring
/// case. Order is preserved and an empty `text` keeps every record.
pub fn filter_rows(rows: &[Record], text: &str) -> Vec<Record> {
    if text.is_empty() {
        return rows.to_vec();
    }

    let needle = text.to_lowercase();
    rows.iter()
        .filter(|record| record.matches_lowercase(&needle))
        .cloned()
        .collect()
}
