//! Navbar quick search.
//!
//! Matches a query against a fixed set of entries by case-insensitive
//! substring, keeping the index order. Submitting a query jumps to the first
//! result.

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::route::Route;

/// What a search entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Page,
    Project,
    Document,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Project => "project",
            Self::Document => "document",
        }
    }
}

/// A searchable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub id: u32,
    pub name: String,
    pub kind: EntryKind,
    pub path: String,
}

impl SearchEntry {
    pub fn new(id: u32, name: impl Into<String>, kind: EntryKind, path: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            path: path.into(),
        }
    }

    /// The page this entry opens, if it is one of ours.
    pub fn route(&self) -> Option<Route> {
        Route::from_path(&self.path)
    }
}

/// The entries the navbar can find.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl Default for SearchIndex {
    /// The built-in entries plus one page entry per route.
    fn default() -> Self {
        let mut entries = vec![
            SearchEntry::new(1, "Project Alpha", EntryKind::Project, "/projects/alpha"),
            SearchEntry::new(2, "Documentation", EntryKind::Document, "/docs"),
            SearchEntry::new(3, "User Dashboard", EntryKind::Page, "/dashboard"),
        ];
        let mut id = 3;
        for route in Route::ALL {
            id += 1;
            entries.push(SearchEntry::new(id, route.title(), EntryKind::Page, route.path()));
        }
        Self { entries }
    }
}

impl SearchIndex {
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Entries whose name contains `query`, ignoring case.
    ///
    /// A blank query returns nothing.
    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let atom = Atom::new(
            query,
            CaseMatching::Ignore,
            Normalization::Never,
            AtomKind::Substring,
            false,
        );

        let mut buf = Vec::new();
        self.entries
            .iter()
            .filter(|entry| {
                let haystack = Utf32Str::new(&entry.name, &mut buf);
                atom.score(haystack, &mut matcher).is_some()
            })
            .collect()
    }

    /// The path of the first result for `query`.
    pub fn submit(&self, query: &str) -> Option<&str> {
        self.search(query).first().map(|entry| entry.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_has_no_results() {
        let index = SearchIndex::default();
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn test_substring_ignores_case() {
        let index = SearchIndex::default();
        let names: Vec<&str> = index
            .search("DASH")
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["User Dashboard", "Dashboard"]);
    }

    #[test]
    fn test_not_fuzzy() {
        let index = SearchIndex::default();
        // subsequence of "Project", but not a substring
        assert!(index.search("pjt").is_empty());
    }

    #[test]
    fn test_submit_returns_first_path() {
        let index = SearchIndex::default();
        assert_eq!(index.submit("doc"), Some("/docs"));
        assert_eq!(index.submit("settings"), Some("/settings"));
        assert_eq!(index.submit("nothing here"), None);
    }

    #[test]
    fn test_entry_route() {
        let index = SearchIndex::default();
        let results = index.search("settings");
        assert_eq!(results[0].route(), Some(Route::Settings));
        let results = index.search("alpha");
        assert_eq!(results[0].route(), None);
    }
}
