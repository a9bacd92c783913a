//! Page fetching
//!
//! [`PageFetcher`] is the seam between the tool operations and the network.
//! [`HttpFetcher`] is the reqwest-backed implementation used by the binary;
//! tests substitute scripted fetchers.

mod http;

pub use http::HttpFetcher;

use futures::future::BoxFuture;
use std::time::Duration;
use thiserror::Error;

use crate::errors::DocsError;

/// Per-request overrides
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Overrides the fetcher's default timeout
    pub timeout: Option<Duration>,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
}

impl FetchOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Raw response of a fetch, after redirects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub markup: String,
    pub final_url: String,
    pub status_code: u16,
}

impl FetchedPage {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }
}

/// Network-class fetch failure. 4xx responses are not errors.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Server error {status} with empty body from {url}")]
    ServerError { url: String, status: u16 },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<FetchError> for DocsError {
    fn from(err: FetchError) -> Self {
        let message = match &err {
            FetchError::Timeout { .. } => "Request timed out",
            FetchError::Request { .. } => "Failed to fetch page",
            FetchError::ServerError { .. } => "Server returned an error",
            FetchError::InvalidUrl { .. } => "Invalid URL",
        };
        DocsError::network(message, Some(err.to_string()))
    }
}

/// Fetches raw page markup
///
/// Implementations must follow redirects, return 4xx responses as ordinary
/// pages, and fail with [`FetchError`] on timeouts, connection failures and
/// 5xx responses without a body.
pub trait PageFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
        options: &'a FetchOptions,
    ) -> BoxFuture<'a, Result<FetchedPage, FetchError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_fetch_error_maps_to_network_kind() {
        let err: DocsError = FetchError::Timeout {
            url: "https://docs.tenable.com/x".to_string(),
        }
        .into();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), "Request timed out");
        assert!(err.details().is_some_and(|d| d.contains("docs.tenable.com/x")));
    }

    #[test]
    fn test_status_helpers() {
        let page = FetchedPage {
            markup: String::new(),
            final_url: "https://example.org".to_string(),
            status_code: 404,
        };
        assert!(page.is_not_found());
        assert!(!page.is_success());
    }
}
