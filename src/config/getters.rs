//! Getter methods for `DocsConfig`

use std::time::Duration;

use super::types::{DocsConfig, SeedPage};

impl DocsConfig {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    #[must_use]
    pub fn root_reference_url(&self) -> &str {
        &self.root_reference_url
    }

    #[must_use]
    pub fn seed_pages(&self) -> &[SeedPage] {
        &self.seed_pages
    }

    #[must_use]
    pub fn cache_max_size(&self) -> usize {
        self.cache_max_size
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    #[must_use]
    pub fn cache_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cache_cleanup_interval_secs)
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn max_batch_pages(&self) -> usize {
        self.max_batch_pages
    }
}
