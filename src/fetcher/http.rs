//! reqwest-backed fetcher

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use reqwest::{Client, redirect};
use url::Url;

use super::{FetchError, FetchOptions, FetchedPage, PageFetcher};
use crate::config::DocsConfig;

/// HTTP fetcher with bounded redirects and a default timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &DocsConfig) -> Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(config.max_redirects()))
            .timeout(config.fetch_timeout())
            .user_agent(config.user_agent())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    async fn fetch_page(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut request = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml");
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| classify(url, &e))?;
        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let markup = response.text().await.map_err(|e| classify(url, &e))?;

        if response_is_empty_server_error(status_code, &markup) {
            tracing::warn!(url = %url, status = status_code, "Server error with empty body");
            return Err(FetchError::ServerError {
                url: url.to_string(),
                status: status_code,
            });
        }

        tracing::debug!(
            url = %url,
            final_url = %final_url,
            status = status_code,
            bytes = markup.len(),
            "Fetched page"
        );

        Ok(FetchedPage {
            markup,
            final_url,
            status_code,
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
        options: &'a FetchOptions,
    ) -> BoxFuture<'a, Result<FetchedPage, FetchError>> {
        Box::pin(self.fetch_page(url, options))
    }
}

fn response_is_empty_server_error(status: u16, markup: &str) -> bool {
    status >= 500 && markup.trim().is_empty()
}

fn classify(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
