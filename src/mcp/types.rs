//! MCP tool arguments and outputs

use chrono::{DateTime, Utc};
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::search::{CatalogMatch, CategorySummary, IndexedEntry, ScoredEntry};

/// Arguments for `search_docs`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchDocsArgs {
    /// Keywords to look for, e.g. "export vulnerabilities" (2-200 characters)
    pub query: String,
}

/// Arguments for `read_page`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadPageArgs {
    /// Absolute http(s) URL of a documentation page
    pub url: String,
}

/// Arguments for `read_pages`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadPagesArgs {
    /// Absolute http(s) URLs of documentation pages
    pub urls: Vec<String>,
}

/// Arguments for `browse_docs`
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct BrowseDocsArgs {
    /// Category to list; omit to list all categories
    #[serde(default)]
    pub category: Option<String>,
}

/// Which backend answered a search or browse request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// The inverted index built from the seed pages
    Index,
    /// The fixed category catalog, used while the index is empty
    Catalog,
}

/// One search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Matched query terms in index mode, pattern score in `[0, 1]` in catalog mode
    pub score: f64,
}

impl From<ScoredEntry> for SearchHit {
    fn from(scored: ScoredEntry) -> Self {
        let ScoredEntry { entry, score } = scored;
        Self {
            url: entry.url,
            title: entry.title,
            description: entry.description,
            category: entry.category,
            score: score as f64,
        }
    }
}

impl From<IndexedEntry> for SearchHit {
    fn from(entry: IndexedEntry) -> Self {
        Self {
            url: entry.url,
            title: entry.title,
            description: entry.description,
            category: entry.category,
            score: 1.0,
        }
    }
}

impl From<CatalogMatch> for SearchHit {
    fn from(found: CatalogMatch) -> Self {
        Self {
            url: found.url,
            title: found.title,
            description: found.description,
            category: found.category,
            score: found.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchDocsOutput {
    pub query: String,
    pub mode: SearchMode,
    pub result_count: usize,
    pub results: Vec<SearchHit>,
}

/// A documentation page rendered as Markdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOutput {
    /// URL as requested
    pub url: String,
    /// URL the content was actually served from, after redirects and fallback
    pub final_url: String,
    pub title: Option<String>,
    pub markdown: String,
    pub word_count: usize,
    pub fetched_at: DateTime<Utc>,
    /// Served from the page cache
    pub from_cache: bool,
    /// The requested page was not found and substitute content was returned
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadPagesOutput {
    pub page_count: usize,
    pub pages: Vec<PageOutput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseDocsOutput {
    pub mode: SearchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Categories with their entry counts (index mode, no category requested)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategorySummary>,
    pub results: Vec<SearchHit>,
}
