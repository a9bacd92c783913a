//! Configuration loading
//!
//! Precedence (lowest to highest): built-in defaults, the JSON file named by
//! `DOCS_BRIDGE_CONFIG`, individual `DOCS_BRIDGE_*` environment variables.

use anyhow::{Context, Result};
use std::path::Path;

use super::types::{DocsConfig, default_seed_pages};

pub const CONFIG_PATH_ENV: &str = "DOCS_BRIDGE_CONFIG";
pub const BASE_URL_ENV: &str = "DOCS_BRIDGE_BASE_URL";
pub const ALLOWED_DOMAINS_ENV: &str = "DOCS_BRIDGE_ALLOWED_DOMAINS";
pub const CACHE_SIZE_ENV: &str = "DOCS_BRIDGE_CACHE_SIZE";
pub const CACHE_TTL_ENV: &str = "DOCS_BRIDGE_CACHE_TTL_SECS";
pub const FETCH_TIMEOUT_ENV: &str = "DOCS_BRIDGE_FETCH_TIMEOUT_SECS";

impl DocsConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` for environment access.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) if !path.trim().is_empty() => Self::from_json_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };

        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            let base_url = base_url.trim().trim_end_matches('/').to_string();
            self.root_reference_url = format!("{base_url}/reference");
            self.seed_pages = default_seed_pages(&base_url);
            self.base_url = base_url;
        }

        if let Some(domains) = lookup(ALLOWED_DOMAINS_ENV) {
            let parsed: Vec<String> = domains
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
            if !parsed.is_empty() {
                self.allowed_domains = parsed;
            }
        }

        if let Some(size) = lookup(CACHE_SIZE_ENV) {
            self.cache_max_size = size
                .trim()
                .parse()
                .with_context(|| format!("{CACHE_SIZE_ENV} must be an integer, got '{size}'"))?;
        }

        if let Some(ttl) = lookup(CACHE_TTL_ENV) {
            self.cache_ttl_secs = ttl
                .trim()
                .parse()
                .with_context(|| format!("{CACHE_TTL_ENV} must be an integer, got '{ttl}'"))?;
        }

        if let Some(timeout) = lookup(FETCH_TIMEOUT_ENV) {
            self.fetch_timeout_secs = timeout.trim().parse().with_context(|| {
                format!("{FETCH_TIMEOUT_ENV} must be an integer, got '{timeout}'")
            })?;
        }

        Ok(())
    }
}
