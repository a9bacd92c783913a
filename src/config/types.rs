//! Core configuration types for the documentation bridge
//!
//! `DocsConfig` fixes the documentation domain (origin, allow-list, seed
//! pages) and the operational limits of the fetch and cache layers.

use serde::{Deserialize, Serialize};

use crate::utils::{
    DEFAULT_ALLOWED_DOMAINS, DEFAULT_BASE_URL, DEFAULT_CACHE_CLEANUP_INTERVAL_SECS,
    DEFAULT_CACHE_MAX_SIZE, DEFAULT_CACHE_TTL_SECS, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_MAX_BATCH_PAGES, DEFAULT_MAX_REDIRECTS, DEFAULT_ROOT_REFERENCE_PATH, USER_AGENT,
};

/// A page the search index is built from, tagged with the category every
/// link discovered on it is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPage {
    pub url: String,
    pub category: String,
}

impl SeedPage {
    pub fn new(url: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            category: category.into(),
        }
    }
}

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Origin root-relative links are joined against.
    ///
    /// **INVARIANT:** absolute http(s) URL (checked by `validate`).
    pub(crate) base_url: String,
    pub(crate) allowed_domains: Vec<String>,
    /// Page tried when a requested page returns 404
    pub(crate) root_reference_url: String,
    pub(crate) seed_pages: Vec<SeedPage>,
    pub(crate) cache_max_size: usize,
    pub(crate) cache_ttl_secs: u64,
    pub(crate) cache_cleanup_interval_secs: u64,
    pub(crate) fetch_timeout_secs: u64,
    pub(crate) max_redirects: usize,
    pub(crate) user_agent: String,
    pub(crate) max_batch_pages: usize,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            allowed_domains: DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
            root_reference_url: format!("{DEFAULT_BASE_URL}{DEFAULT_ROOT_REFERENCE_PATH}"),
            seed_pages: default_seed_pages(DEFAULT_BASE_URL),
            cache_max_size: DEFAULT_CACHE_MAX_SIZE,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_cleanup_interval_secs: DEFAULT_CACHE_CLEANUP_INTERVAL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: USER_AGENT.to_string(),
            max_batch_pages: DEFAULT_MAX_BATCH_PAGES,
        }
    }
}

/// Landing pages of the documentation site, one per top-level category
pub(crate) fn default_seed_pages(base_url: &str) -> Vec<SeedPage> {
    let base = base_url.trim_end_matches('/');
    vec![
        SeedPage::new(format!("{base}/reference"), "api-reference"),
        SeedPage::new(format!("{base}/docs"), "guides"),
        SeedPage::new(format!("{base}/recipes"), "recipes"),
    ]
}
