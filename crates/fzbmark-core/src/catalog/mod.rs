use crate::bookmark::{BookmarkRecord, Browser};
use std::collections::HashSet;

/// Query criteria for catalog lookups
///
/// All conditions are combined with AND logic - a record must match every
/// criterion that is set.
#[derive(Debug, Default, Clone)]
pub struct CatalogQuery {
    /// Only records from this browser
    pub browser: Option<Browser>,
    /// Case-insensitive substring matched against title and URL
    pub term: Option<String>,
}

impl CatalogQuery {
    /// Create a query that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_browser(mut self, browser: Browser) -> Self {
        self.browser = Some(browser);
        self
    }

    /// Set the search term (stored lowercased)
    pub fn with_term(mut self, term: impl AsRef<str>) -> Self {
        self.term = Some(term.as_ref().to_lowercase());
        self
    }

    /// Check if a record matches all criteria
    pub fn matches(&self, record: &BookmarkRecord) -> bool {
        if !self.matches_browser(record) {
            return false;
        }
        if !self.matches_term(record) {
            return false;
        }
        true
    }

    fn matches_browser(&self, record: &BookmarkRecord) -> bool {
        match self.browser {
            None => true,
            Some(browser) => record.browser() == browser,
        }
    }

    fn matches_term(&self, record: &BookmarkRecord) -> bool {
        match &self.term {
            None => true,
            Some(term) if term.is_empty() => true,
            Some(term) => {
                record.title().to_lowercase().contains(term.as_str())
                    || record.url().to_lowercase().contains(term.as_str())
            }
        }
    }
}

/// The deduplicated, ordered set of bookmarks for one run.
///
/// Built once from parser output and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<BookmarkRecord>,
}

impl Catalog {
    /// Build a catalog from per-profile record sequences.
    ///
    /// `sources` must be given in profile-discovery order. Records are
    /// stably ordered by browser priority, so within a browser the discovery
    /// order and then the parser's emission order are kept. On a URL
    /// collision (exact, case-sensitive) the first record wins.
    pub fn build<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Vec<BookmarkRecord>>,
    {
        let mut all: Vec<BookmarkRecord> = sources.into_iter().flatten().collect();
        all.sort_by_key(|record| record.browser());

        let mut seen: HashSet<String> = HashSet::with_capacity(all.len());
        let mut records = Vec::with_capacity(all.len());

        for record in all {
            if seen.contains(record.url()) {
                tracing::debug!(
                    "Dropping duplicate {} from {}/{}",
                    record.url(),
                    record.browser(),
                    record.profile()
                );
                continue;
            }
            seen.insert(record.url().to_string());
            records.push(record);
        }

        tracing::debug!("Catalog built with {} bookmarks", records.len());

        Self { records }
    }

    /// All records in catalog order
    pub fn all(&self) -> &[BookmarkRecord] {
        &self.records
    }

    /// Records from one browser, in catalog order
    pub fn filter_by_browser(&self, browser: Browser) -> Vec<&BookmarkRecord> {
        self.query(&CatalogQuery::new().with_browser(browser))
    }

    /// Records whose title or URL contains `term`, ignoring case
    pub fn search(&self, term: &str) -> Vec<&BookmarkRecord> {
        self.query(&CatalogQuery::new().with_term(term))
    }

    /// Records matching every criterion of `query`, in catalog order
    pub fn query(&self, query: &CatalogQuery) -> Vec<&BookmarkRecord> {
        self.records
            .iter()
            .filter(|record| query.matches(record))
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&BookmarkRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
