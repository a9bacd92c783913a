//! In-memory inverted index over discovered documentation links

use std::collections::{BTreeMap, BTreeSet, HashMap};
use url::Url;

use super::keywords::extract_keywords;
use super::link_extractor::extract_doc_links;
use super::types::{CategorySummary, IndexStats, IndexedEntry, ScoredEntry};
use crate::config::DocsConfig;
use crate::fetcher::{FetchOptions, PageFetcher};
use crate::utils::MAX_SEARCH_RESULTS;

/// Entry list plus keyword and category postings.
///
/// Every position stored in a postings list is a valid index into `entries`,
/// and no two entries share a URL.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexedEntry>,
    keyword_postings: HashMap<String, Vec<usize>>,
    category_postings: BTreeMap<String, Vec<usize>>,
}

impl SearchIndex {
    /// Build an index from entries in discovery order.
    ///
    /// A URL seen twice keeps its first position and its last-seen entry.
    #[must_use]
    pub fn build(discovered: impl IntoIterator<Item = IndexedEntry>) -> Self {
        let mut entries: Vec<IndexedEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for entry in discovered {
            match positions.get(&entry.url) {
                Some(&pos) => entries[pos] = entry,
                None => {
                    positions.insert(entry.url.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        let mut keyword_postings: HashMap<String, Vec<usize>> = HashMap::new();
        let mut category_postings: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (pos, entry) in entries.iter().enumerate() {
            for keyword in &entry.keywords {
                keyword_postings.entry(keyword.clone()).or_default().push(pos);
            }
            category_postings
                .entry(entry.category.clone())
                .or_default()
                .push(pos);
        }

        Self {
            entries,
            keyword_postings,
            category_postings,
        }
    }

    /// Fetch every seed page in order and index the links found on them.
    ///
    /// Best-effort: a seed page that fails to fetch or answers with a status
    /// of 400 or above is skipped.
    pub async fn build_from_seeds(fetcher: &dyn PageFetcher, config: &DocsConfig) -> Self {
        let base = match Url::parse(config.base_url()) {
            Ok(base) => base,
            Err(e) => {
                tracing::error!(
                    base_url = %config.base_url(),
                    error = %e,
                    "Invalid base URL, index left empty"
                );
                return Self::default();
            }
        };

        let options = FetchOptions::default();
        let mut discovered = Vec::new();

        for seed in config.seed_pages() {
            let page = match fetcher.fetch(&seed.url, &options).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(url = %seed.url, error = %e, "Skipping seed page");
                    continue;
                }
            };
            if page.status_code >= 400 {
                tracing::warn!(url = %seed.url, status = page.status_code, "Skipping seed page");
                continue;
            }

            let links = extract_doc_links(
                &page.markup,
                &seed.category,
                &base,
                config.allowed_domains(),
            );
            tracing::info!(
                url = %seed.url,
                category = %seed.category,
                links = links.len(),
                "Indexed seed page"
            );
            discovered.extend(links);
        }

        let index = Self::build(discovered);
        let stats = index.stats();
        tracing::info!(
            entries = stats.entries,
            keywords = stats.keywords,
            categories = stats.categories,
            "Search index built"
        );
        index
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[IndexedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entries: self.entries.len(),
            keywords: self.keyword_postings.len(),
            categories: self.category_postings.len(),
        }
    }

    /// Rank entries by the number of distinct query tokens they match.
    ///
    /// Ties keep index order. At most [`MAX_SEARCH_RESULTS`] entries are
    /// returned; a query without tokens yields nothing.
    #[must_use]
    pub fn search_scored(&self, query: &str) -> Vec<ScoredEntry> {
        let tokens: BTreeSet<String> = extract_keywords(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scores: BTreeMap<usize, usize> = BTreeMap::new();
        for token in &tokens {
            if let Some(postings) = self.keyword_postings.get(token) {
                for &pos in postings {
                    *scores.entry(pos).or_insert(0) += 1;
                }
            }
        }

        // BTreeMap iteration is in position order, so the stable sort keeps
        // index order among equal scores.
        let mut ranked: Vec<(usize, usize)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(MAX_SEARCH_RESULTS);

        ranked
            .into_iter()
            .map(|(pos, score)| ScoredEntry {
                entry: self.entries[pos].clone(),
                score,
            })
            .collect()
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<IndexedEntry> {
        self.search_scored(query)
            .into_iter()
            .map(|scored| scored.entry)
            .collect()
    }

    /// Categories in name order with their entry counts
    #[must_use]
    pub fn categories(&self) -> Vec<CategorySummary> {
        self.category_postings
            .iter()
            .map(|(category, positions)| CategorySummary {
                category: category.clone(),
                entries: positions.len(),
            })
            .collect()
    }

    /// Entries filed under `category`, in index order, at most `limit`
    #[must_use]
    pub fn entries_in_category(&self, category: &str, limit: usize) -> Vec<IndexedEntry> {
        self.category_postings
            .get(category)
            .map(|positions| {
                positions
                    .iter()
                    .take(limit)
                    .map(|&pos| self.entries[pos].clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, category: &str, keywords: &[&str]) -> IndexedEntry {
        IndexedEntry {
            url: url.to_string(),
            title: url.to_string(),
            description: String::new(),
            category: category.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    #[test]
    fn test_more_matching_tokens_rank_higher() {
        let index = SearchIndex::build([
            entry("https://a.tenable.com/b", "api", &["scan"]),
            entry("https://a.tenable.com/a", "api", &["scan", "asset"]),
        ]);

        let results = index.search_scored("scan asset");
        assert_eq!(results[0].entry.url, "https://a.tenable.com/a");
        assert_eq!(results[0].score, 2);
        assert_eq!(results[1].entry.url, "https://a.tenable.com/b");
        assert_eq!(results[1].score, 1);
    }

    #[test]
    fn test_ties_keep_index_order() {
        let index = SearchIndex::build([
            entry("https://a.tenable.com/1", "api", &["scan"]),
            entry("https://a.tenable.com/2", "api", &["scan"]),
            entry("https://a.tenable.com/3", "api", &["scan"]),
        ]);

        let urls: Vec<String> = index.search("scan").into_iter().map(|e| e.url).collect();
        assert_eq!(
            urls,
            [
                "https://a.tenable.com/1",
                "https://a.tenable.com/2",
                "https://a.tenable.com/3"
            ]
        );
    }

    #[test]
    fn test_results_truncated() {
        let index = SearchIndex::build(
            (0..25).map(|i| entry(&format!("https://a.tenable.com/{i}"), "api", &["scan"])),
        );
        assert_eq!(index.search("scan").len(), MAX_SEARCH_RESULTS);
    }

    #[test]
    fn test_duplicate_url_last_write_wins() {
        let index = SearchIndex::build([
            entry("https://a.tenable.com/x", "guides", &["old"]),
            entry("https://a.tenable.com/y", "guides", &["other"]),
            entry("https://a.tenable.com/x", "api-reference", &["new"]),
        ]);

        assert_eq!(index.entries().len(), 2);
        assert_eq!(index.entries()[0].category, "api-reference");
        assert!(index.search("old").is_empty());
        assert_eq!(index.search("new").len(), 1);

        let categories = index.categories();
        assert_eq!(categories.len(), 2);
        assert!(categories.iter().all(|c| c.entries == 1));
    }

    #[test]
    fn test_postings_point_at_valid_entries() {
        let index = SearchIndex::build([
            entry("https://a.tenable.com/x", "a", &["one", "two"]),
            entry("https://a.tenable.com/x", "b", &["three"]),
            entry("https://a.tenable.com/z", "b", &["one"]),
        ]);

        for positions in index.keyword_postings.values() {
            assert!(positions.iter().all(|&p| p < index.entries.len()));
        }
        for positions in index.category_postings.values() {
            assert!(positions.iter().all(|&p| p < index.entries.len()));
        }
    }

    #[test]
    fn test_stopword_only_query_is_empty() {
        let index = SearchIndex::build([entry("https://a.tenable.com/x", "a", &["scan"])]);
        assert!(index.search("the api and").is_empty());
    }

    #[test]
    fn test_entries_in_category() {
        let index = SearchIndex::build(
            (0..5).map(|i| entry(&format!("https://a.tenable.com/{i}"), "guides", &["x"])),
        );
        assert_eq!(index.entries_in_category("guides", 3).len(), 3);
        assert!(index.entries_in_category("missing", 3).is_empty());
    }
}
