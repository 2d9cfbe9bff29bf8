//! Search engine implementation
//!
//! A stateless function of (query, limit, offset) over the current store
//! contents. No caching, no indexing: every call is one full linear pass in
//! insertion order, and the returned page, total and has-more flag all come
//! from that same pass. Computing the total from a separate count query
//! would let it drift from the page under concurrent mutation; a single
//! cursor state keeps the two mutually consistent.
//!
//! Full re-scan per page is O(N²/P) across all pages. That is an accepted
//! ceiling for this data scale (tens of thousands of records, interactive
//! search), not an oversight: an index would change which substrings match.

use crate::field::SearchResult;
use crate::storage::FieldStore;
use crate::Result;

/// Search engine over a field store
pub struct SearchEngine<'a> {
    store: &'a FieldStore,
}

impl<'a> SearchEngine<'a> {
    /// Create a new search engine
    pub fn new(store: &'a FieldStore) -> Self {
        Self { store }
    }

    /// Substring search with offset/limit pagination.
    ///
    /// The query is trimmed and lowercased; an empty normalized query
    /// matches every record. A record matches iff its stored search key
    /// contains the normalized query as a contiguous substring. No
    /// tokenization, no stemming, no ranking.
    pub fn search(&self, query: &str, limit: usize, offset: usize) -> Result<SearchResult> {
        let needle = query.trim().to_lowercase();

        let mut records = Vec::new();
        let mut matched = 0usize;

        self.store.scan(|row| {
            if needle.is_empty() || row.search_key.contains(&needle) {
                matched += 1;
                // The match that brings `matched` to offset+1 is the first
                // one collected for this page.
                if matched > offset && records.len() < limit {
                    records.push(row.field.clone());
                }
            }
        })?;

        let has_more = matched > offset + records.len();
        Ok(SearchResult {
            records,
            total: matched,
            has_more,
        })
    }
}
