//! Keyword search over the documentation site
//!
//! Links discovered on a fixed set of seed pages are indexed in memory by
//! keyword and category. Queries are ranked by term overlap; when the index
//! is empty a pattern-matching catalog answers instead.

pub mod catalog;
pub mod engine;
pub mod index;
pub mod keywords;
pub mod link_extractor;
pub mod types;

pub use catalog::{CATALOG, CatalogMatch, DocsCatalog};
pub use engine::DocsIndex;
pub use index::SearchIndex;
pub use keywords::{extract_keywords, extract_url_keywords};
pub use link_extractor::extract_doc_links;
pub use types::{CategorySummary, IndexStats, IndexedEntry, ScoredEntry};
