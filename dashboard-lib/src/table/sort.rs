//! Sort stage.

use std::cmp::Ordering;

use crate::model::{Record, SortConfig, SortDirection, SortKey};

/// Returns a new sequence holding every record of `rows` exactly once, ordered
/// by `config`.
///
/// With no key the input order is kept. Otherwise records compare by the key's
/// field (numeric for ids, lexicographic for strings). Records with equal keys
/// keep their order in `rows` when ascending and appear in exactly reversed
/// order when descending, so the descending result is the ascending one
/// reversed.
pub fn sort_rows(rows: &[Record], config: SortConfig) -> Vec<Record> {
    let Some(key) = config.key else {
        return rows.to_vec();
    };

    let mut indexed: Vec<(usize, &Record)> = rows.iter().enumerate().collect();
    indexed.sort_by(|&(i, a), &(j, b)| compare((i, a), (j, b), key, config.direction));
    indexed.into_iter().map(|(_, record)| record.clone()).collect()
}

fn compare(
    (i, a): (usize, &Record),
    (j, b): (usize, &Record),
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    // position in the store breaks ties
    let ordering = a.cmp_by(b, key).then(i.cmp(&j));
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Record> {
        vec![
            Record::new(2, "Bob", "bob@x.com"),
            Record::new(1, "Cara", "cara@x.com"),
            Record::new(3, "Ann", "ann@x.com"),
        ]
    }

    fn ids(rows: &[Record]) -> Vec<u64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_no_key_keeps_order() {
        let sorted = sort_rows(&rows(), SortConfig::default());
        assert_eq!(ids(&sorted), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_by_id() {
        let sorted = sort_rows(&rows(), SortConfig::by(SortKey::Id, SortDirection::Asc));
        assert_eq!(ids(&sorted), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_by_name_desc() {
        let sorted = sort_rows(&rows(), SortConfig::by(SortKey::Name, SortDirection::Desc));
        assert_eq!(ids(&sorted), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_store_order() {
        let rows = vec![
            Record::new(3, "Sam", "c@x.com"),
            Record::new(1, "Sam", "a@x.com"),
            Record::new(2, "Ann", "b@x.com"),
        ];
        let asc = sort_rows(&rows, SortConfig::by(SortKey::Name, SortDirection::Asc));
        assert_eq!(ids(&asc), vec![2, 3, 1]);

        let desc = sort_rows(&rows, SortConfig::by(SortKey::Name, SortDirection::Desc));
        assert_eq!(ids(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = rows();
        let _ = sort_rows(&input, SortConfig::by(SortKey::Email, SortDirection::Asc));
        assert_eq!(ids(&input), vec![2, 1, 3]);
    }
}
