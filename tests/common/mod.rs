//! Shared fixtures for the docs-bridge integration tests

use docs_bridge::{
    DocsConfig, DocsIndex, DocsService, FetchError, FetchOptions, FetchedPage, PageFetcher,
    SeedPage,
};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BASE: &str = "https://developer.tenable.com";

/// Canned response for one URL
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Scripted {
    Page { status: u16, markup: String },
    Redirect { to: String, markup: String },
    Timeout,
}

/// In-memory fetcher answering from a script. Unknown URLs answer 404 with an
/// empty body. Counts every call.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: Mutex<HashMap<String, Scripted>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, markup: impl Into<String>) -> Self {
        self.respond(url, Scripted::Page {
            status: 200,
            markup: markup.into(),
        })
    }

    pub fn status(self, url: &str, status: u16, markup: impl Into<String>) -> Self {
        self.respond(url, Scripted::Page {
            status,
            markup: markup.into(),
        })
    }

    pub fn respond(self, url: &str, response: Scripted) -> Self {
        self.responses.lock().insert(url.to_string(), response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
        _options: &'a FetchOptions,
    ) -> BoxFuture<'a, Result<FetchedPage, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.responses.lock().get(url).cloned();

        Box::pin(async move {
            match scripted {
                Some(Scripted::Page { status, markup }) => Ok(FetchedPage {
                    markup,
                    final_url: url.to_string(),
                    status_code: status,
                }),
                Some(Scripted::Redirect { to, markup }) => Ok(FetchedPage {
                    markup,
                    final_url: to,
                    status_code: 200,
                }),
                Some(Scripted::Timeout) => Err(FetchError::Timeout {
                    url: url.to_string(),
                }),
                None => Ok(FetchedPage {
                    markup: String::new(),
                    final_url: url.to_string(),
                    status_code: 404,
                }),
            }
        })
    }
}

/// Config pointing at [`BASE`] with a single reference seed page
#[allow(dead_code)]
pub fn test_config() -> DocsConfig {
    DocsConfig::builder()
        .base_url(BASE)
        .allowed_domains(["tenable.com"])
        .seed_pages(vec![SeedPage::new(format!("{BASE}/reference"), "api-reference")])
        .cache_max_size(8)
        .build()
        .expect("test config is valid")
}

#[allow(dead_code)]
pub fn service_with(fetcher: Arc<StaticFetcher>, config: DocsConfig) -> DocsService {
    DocsService::new(Arc::new(config), fetcher, DocsIndex::new())
}

/// A documentation page with a title, main content and site chrome
#[allow(dead_code)]
pub fn doc_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title><script>window.analytics = 1;</script></head>
<body>
  <header><nav><a href="/">Home</a><a href="/reference">Reference</a></nav></header>
  <aside class="sidebar"><ul><li><a href="/reference/scans">Scans</a></li></ul></aside>
  <main>
    <h1>{title}</h1>
    {body}
  </main>
  <footer>Copyright Tenable, Inc.</footer>
</body>
</html>"#
    )
}

/// A seed page listing `(href, text, description)` links
#[allow(dead_code)]
pub fn link_list_page(links: &[(&str, &str, &str)]) -> String {
    let items: String = links
        .iter()
        .map(|(href, text, description)| {
            format!(r#"<li><a href="{href}">{text}</a><p>{description}</p></li>"#)
        })
        .collect();
    format!("<html><body><main><ul>{items}</ul></main></body></html>")
}
