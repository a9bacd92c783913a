//! Search data types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A documentation link discovered while building the index.
///
/// Immutable once the index is built; `url` is unique within an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexedEntry {
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
}

/// An entry together with its term-overlap score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ScoredEntry {
    #[serde(flatten)]
    pub entry: IndexedEntry,
    /// Number of distinct query tokens whose postings include the entry
    pub score: usize,
}

/// Aggregate counts for a built index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct IndexStats {
    pub entries: usize,
    pub keywords: usize,
    pub categories: usize,
}

/// A category and how many entries are filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CategorySummary {
    pub category: String,
    pub entries: usize,
}
