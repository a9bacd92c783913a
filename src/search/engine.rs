//! Shared handle to the search index
//!
//! The hosting process owns one `DocsIndex`, builds it once and hands clones
//! of the handle to the tool operations. Before the build completes every
//! lookup behaves as if the index were empty.

use std::sync::Arc;
use tokio::sync::OnceCell;

use super::index::SearchIndex;
use super::types::{CategorySummary, IndexStats, IndexedEntry, ScoredEntry};
use crate::config::DocsConfig;
use crate::fetcher::PageFetcher;

/// Cloneable, read-only-after-build handle to a [`SearchIndex`]
#[derive(Debug, Clone, Default)]
pub struct DocsIndex {
    inner: Arc<OnceCell<SearchIndex>>,
}

impl DocsIndex {
    /// An uninitialized handle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle over an already built index
    #[must_use]
    pub fn from_index(index: SearchIndex) -> Self {
        Self {
            inner: Arc::new(OnceCell::new_with(Some(index))),
        }
    }

    /// Build the index from the configured seed pages.
    ///
    /// Only the first call builds; concurrent callers wait for it, and later
    /// calls return immediately.
    pub async fn initialize(&self, fetcher: &dyn PageFetcher, config: &DocsConfig) {
        self.inner
            .get_or_init(|| SearchIndex::build_from_seeds(fetcher, config))
            .await;
    }

    /// Whether the one-time build has completed
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.initialized()
    }

    /// Ready and holding at least one entry
    #[must_use]
    pub fn has_entries(&self) -> bool {
        self.inner.get().is_some_and(|index| !index.is_empty())
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<IndexedEntry> {
        self.inner
            .get()
            .map(|index| index.search(query))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn search_scored(&self, query: &str) -> Vec<ScoredEntry> {
        self.inner
            .get()
            .map(|index| index.search_scored(query))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        self.inner
            .get()
            .map(SearchIndex::stats)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<CategorySummary> {
        self.inner
            .get()
            .map(SearchIndex::categories)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn entries_in_category(&self, category: &str, limit: usize) -> Vec<IndexedEntry> {
        self.inner
            .get()
            .map(|index| index.entries_in_category(category, limit))
            .unwrap_or_default()
    }
}
