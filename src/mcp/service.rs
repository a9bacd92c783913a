//! Tool operations behind the MCP surface
//!
//! `DocsService` owns the collaborators a tool call needs (fetcher, index
//! handle, catalog, page cache) and returns typed outputs or [`DocsError`]s.
//! The rmcp layer in `server.rs` only renders them.

use chrono::Utc;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::guidance::{not_found_guidance, not_found_notice};
use super::types::{
    BrowseDocsOutput, PageOutput, ReadPagesOutput, SearchDocsOutput, SearchHit, SearchMode,
};
use super::validation::{validate_page_batch, validate_page_url, validate_query};
use crate::cache::ResultCache;
use crate::config::DocsConfig;
use crate::errors::{DocsError, DocsResult, ErrorKind};
use crate::fetcher::{FetchOptions, PageFetcher};
use crate::markdown_converter::{ConvertedPage, PageOptions, convert_page_async, count_words};
use crate::search::{DocsCatalog, DocsIndex};
use crate::utils::normalize_url;

/// Index entries listed per category by `browse_docs`
pub const MAX_BROWSE_RESULTS: usize = 50;

/// Page cache keyed by normalized URL
pub type PageCache = ResultCache<PageOutput>;

#[derive(Clone)]
pub struct DocsService {
    config: Arc<DocsConfig>,
    fetcher: Arc<dyn PageFetcher>,
    index: DocsIndex,
    catalog: DocsCatalog,
    cache: Arc<PageCache>,
    page_options: PageOptions,
    fetch_options: FetchOptions,
}

impl DocsService {
    /// Service with a fresh page cache sized from `config`
    pub fn new(config: Arc<DocsConfig>, fetcher: Arc<dyn PageFetcher>, index: DocsIndex) -> Self {
        let cache = Arc::new(ResultCache::new(config.cache_max_size(), config.cache_ttl()));
        Self::with_cache(config, fetcher, index, cache)
    }

    pub fn with_cache(
        config: Arc<DocsConfig>,
        fetcher: Arc<dyn PageFetcher>,
        index: DocsIndex,
        cache: Arc<PageCache>,
    ) -> Self {
        let catalog = DocsCatalog::new(&config);
        Self {
            config,
            fetcher,
            index,
            catalog,
            cache,
            page_options: PageOptions::default(),
            fetch_options: FetchOptions::default(),
        }
    }

    #[must_use]
    pub fn with_page_options(mut self, options: PageOptions) -> Self {
        self.page_options = options;
        self
    }

    #[must_use]
    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    pub fn index(&self) -> &DocsIndex {
        &self.index
    }

    pub fn cache(&self) -> &Arc<PageCache> {
        &self.cache
    }

    /// Build the search index from the configured seed pages (once)
    pub async fn initialize_index(&self) {
        self.index
            .initialize(self.fetcher.as_ref(), &self.config)
            .await;
    }

    /// Keyword search: the index when it has entries, the catalog otherwise
    pub fn search_docs(&self, query: &str) -> DocsResult<SearchDocsOutput> {
        let query = validate_query(query)?;

        let (mode, results): (SearchMode, Vec<SearchHit>) = if self.index.has_entries() {
            let hits = self.index.search_scored(query);
            (SearchMode::Index, hits.into_iter().map(SearchHit::from).collect())
        } else {
            let hits = self.catalog.search(query);
            (SearchMode::Catalog, hits.into_iter().map(SearchHit::from).collect())
        };

        debug!(query = %query, mode = ?mode, results = results.len(), "search_docs");
        Ok(SearchDocsOutput {
            query: query.to_string(),
            mode,
            result_count: results.len(),
            results,
        })
    }

    /// Read one page as Markdown
    pub async fn read_page(&self, url: &str) -> DocsResult<PageOutput> {
        let target = validate_page_url(url, self.config.allowed_domains())?;
        self.read_validated(target.as_str()).await
    }

    /// Read several pages concurrently; any failure fails the batch
    pub async fn read_pages(&self, urls: &[String]) -> DocsResult<ReadPagesOutput> {
        let targets = validate_page_batch(
            urls,
            self.config.max_batch_pages(),
            self.config.allowed_domains(),
        )?;

        let pages =
            try_join_all(targets.iter().map(|url| self.read_validated(url.as_str()))).await?;
        Ok(ReadPagesOutput {
            page_count: pages.len(),
            pages,
        })
    }

    /// List categories, or the pages of one category
    pub fn browse_docs(&self, category: Option<&str>) -> DocsResult<BrowseDocsOutput> {
        let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(requested) => Some(validate_query(requested)?),
            None => None,
        };

        let Some(category) = category else {
            return Ok(if self.index.has_entries() {
                BrowseDocsOutput {
                    mode: SearchMode::Index,
                    category: None,
                    categories: self.index.categories(),
                    results: Vec::new(),
                }
            } else {
                BrowseDocsOutput {
                    mode: SearchMode::Catalog,
                    category: None,
                    categories: Vec::new(),
                    results: self.catalog.all().into_iter().map(SearchHit::from).collect(),
                }
            });
        };

        let entries = self.index.entries_in_category(category, MAX_BROWSE_RESULTS);
        let output = if entries.is_empty() {
            let words = category.replace(['-', '_'], " ");
            BrowseDocsOutput {
                mode: SearchMode::Catalog,
                category: Some(category.to_string()),
                categories: Vec::new(),
                results: self
                    .catalog
                    .search(&words)
                    .into_iter()
                    .map(SearchHit::from)
                    .collect(),
            }
        } else {
            BrowseDocsOutput {
                mode: SearchMode::Index,
                category: Some(category.to_string()),
                categories: Vec::new(),
                results: entries.into_iter().map(SearchHit::from).collect(),
            }
        };
        Ok(output)
    }

    /// Page pipeline for an already validated URL: cache, fetch, 404
    /// fallback, convert, populate cache.
    async fn read_validated(&self, url: &str) -> DocsResult<PageOutput> {
        let key = normalize_url(url).map_err(|e| DocsError::wrap(e, ErrorKind::Scraping))?;

        if let Some(mut cached) = self.cache.get(&key) {
            debug!(url = %url, "Page cache hit");
            cached.from_cache = true;
            return Ok(cached);
        }

        let page = self.fetcher.fetch(url, &self.fetch_options).await?;

        if page.is_not_found() {
            return self.not_found_fallback(url, &key).await;
        }
        if !page.is_success() {
            return Err(DocsError::network(
                format!("HTTP {} while fetching page", page.status_code),
                Some(url.to_string()),
            ));
        }

        let ConvertedPage {
            title,
            markdown,
            word_count,
        } = convert_page_async(&page.markup, &self.page_options).await?;

        let output = PageOutput {
            url: url.to_string(),
            final_url: page.final_url,
            title,
            markdown,
            word_count,
            fetched_at: Utc::now(),
            from_cache: false,
            fallback: false,
        };
        self.cache.set(key, output.clone());
        info!(url = %url, words = output.word_count, "Page converted");
        Ok(output)
    }

    /// Substitute content for a 404: the root reference page with a notice,
    /// or the static guidance document. Never cached.
    async fn not_found_fallback(&self, url: &str, key: &str) -> DocsResult<PageOutput> {
        let root_url = self.config.root_reference_url();
        let notice = not_found_notice(url);

        let root_is_target = normalize_url(root_url).is_ok_and(|root_key| root_key == key);
        let root_page = if root_is_target {
            None
        } else {
            match self.fetch_root_reference().await {
                Ok(found) => Some(found),
                Err(e) => {
                    warn!(url = %root_url, error = %e, "Root reference page unavailable");
                    None
                }
            }
        };

        let (final_url, title, markdown) = match root_page {
            Some((final_url, converted)) => {
                warn!(url = %url, "Page not found, serving root reference page");
                (
                    final_url,
                    converted.title,
                    format!("{notice}\n\n{}", converted.markdown),
                )
            }
            None => {
                warn!(url = %url, "Page not found, serving guidance document");
                (
                    url.to_string(),
                    Some("Page not found".to_string()),
                    not_found_guidance(url, &self.catalog),
                )
            }
        };

        Ok(PageOutput {
            url: url.to_string(),
            final_url,
            title,
            word_count: count_words(&markdown),
            markdown,
            fetched_at: Utc::now(),
            from_cache: false,
            fallback: true,
        })
    }

    async fn fetch_root_reference(&self) -> DocsResult<(String, ConvertedPage)> {
        let root_url = self.config.root_reference_url();
        let page = self.fetcher.fetch(root_url, &self.fetch_options).await?;
        if !page.is_success() {
            return Err(DocsError::network(
                format!("HTTP {} while fetching root reference page", page.status_code),
                Some(root_url.to_string()),
            ));
        }
        let converted = convert_page_async(&page.markup, &self.page_options).await?;
        Ok((page.final_url, converted))
    }
}
