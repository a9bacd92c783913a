//! Fluent builder for `DocsConfig`
//!
//! Changing the base URL re-derives the root reference page and the seed
//! pages unless those were set explicitly.

use anyhow::{Result, anyhow};
use url::Url;

use super::types::{DocsConfig, SeedPage, default_seed_pages};
use crate::utils::DEFAULT_ROOT_REFERENCE_PATH;

#[derive(Debug, Clone, Default)]
pub struct DocsConfigBuilder {
    config: DocsConfig,
    root_reference_set: bool,
    seed_pages_set: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn builder() -> DocsConfigBuilder {
        DocsConfigBuilder::default()
    }

    /// Check the invariants every other module relies on.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| anyhow!("Invalid base_url '{}': {e}", self.base_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(anyhow!("base_url must be http(s), got '{}'", base.scheme()));
        }
        if self.allowed_domains.iter().all(|d| d.trim().is_empty()) {
            return Err(anyhow!("allowed_domains must contain at least one domain"));
        }
        Url::parse(&self.root_reference_url).map_err(|e| {
            anyhow!(
                "Invalid root_reference_url '{}': {e}",
                self.root_reference_url
            )
        })?;
        for seed in &self.seed_pages {
            Url::parse(&seed.url).map_err(|e| anyhow!("Invalid seed page '{}': {e}", seed.url))?;
        }
        if self.cache_max_size == 0 {
            return Err(anyhow!("cache_max_size must be at least 1"));
        }
        if self.cache_ttl_secs == 0 {
            return Err(anyhow!("cache_ttl_secs must be greater than 0"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(anyhow!("fetch_timeout_secs must be greater than 0"));
        }
        if self.max_batch_pages == 0 {
            return Err(anyhow!("max_batch_pages must be at least 1"));
        }
        Ok(())
    }
}

impl DocsConfigBuilder {
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !self.root_reference_set {
            self.config.root_reference_url = format!("{base_url}{DEFAULT_ROOT_REFERENCE_PATH}");
        }
        if !self.seed_pages_set {
            self.config.seed_pages = default_seed_pages(&base_url);
        }
        self.config.base_url = base_url;
        self
    }

    #[must_use]
    pub fn allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allowed_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn root_reference_url(mut self, url: impl Into<String>) -> Self {
        self.config.root_reference_url = url.into();
        self.root_reference_set = true;
        self
    }

    #[must_use]
    pub fn seed_pages(mut self, seeds: Vec<SeedPage>) -> Self {
        self.config.seed_pages = seeds;
        self.seed_pages_set = true;
        self
    }

    #[must_use]
    pub fn cache_max_size(mut self, size: usize) -> Self {
        self.config.cache_max_size = size;
        self
    }

    #[must_use]
    pub fn cache_ttl_secs(mut self, secs: u64) -> Self {
        self.config.cache_ttl_secs = secs;
        self
    }

    #[must_use]
    pub fn cache_cleanup_interval_secs(mut self, secs: u64) -> Self {
        self.config.cache_cleanup_interval_secs = secs;
        self
    }

    #[must_use]
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn max_redirects(mut self, hops: usize) -> Self {
        self.config.max_redirects = hops;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn max_batch_pages(mut self, pages: usize) -> Self {
        self.config.max_batch_pages = pages;
        self
    }

    pub fn build(self) -> Result<DocsConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() -> Result<()> {
        DocsConfig::default().validate()
    }

    #[test]
    fn test_base_url_rederives_seed_pages() -> Result<()> {
        let config = DocsConfig::builder()
            .base_url("https://docs.example.org/")
            .allowed_domains(["example.org"])
            .build()?;

        assert_eq!(config.base_url(), "https://docs.example.org");
        assert_eq!(
            config.root_reference_url(),
            "https://docs.example.org/reference"
        );
        assert!(
            config
                .seed_pages()
                .iter()
                .all(|s| s.url.starts_with("https://docs.example.org/"))
        );
        Ok(())
    }

    #[test]
    fn test_explicit_seed_pages_survive_base_url_change() -> Result<()> {
        let config = DocsConfig::builder()
            .seed_pages(vec![SeedPage::new("https://a.example.org/x", "x")])
            .base_url("https://b.example.org")
            .allowed_domains(["example.org"])
            .build()?;

        assert_eq!(config.seed_pages().len(), 1);
        assert_eq!(config.seed_pages()[0].url, "https://a.example.org/x");
        Ok(())
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(DocsConfig::builder().cache_max_size(0).build().is_err());
        assert!(DocsConfig::builder().cache_ttl_secs(0).build().is_err());
        assert!(DocsConfig::builder().base_url("ftp://example.org").build().is_err());
        assert!(
            DocsConfig::builder()
                .allowed_domains(Vec::<String>::new())
                .build()
                .is_err()
        );
    }
}
