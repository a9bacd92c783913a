//! MCP tools for the documentation bridge
//!
//! ## Tools
//!
//! - `search_docs` `{query}`: keyword search over the seed-page index, or the
//!   category catalog while the index is empty.
//! - `read_page` `{url}`: fetch an allow-listed page and return its main
//!   content as Markdown. A 404 yields substitute content, not an error.
//! - `read_pages` `{urls}`: `read_page` for a batch, all or nothing.
//! - `browse_docs` `{category?}`: list categories or the pages of one.
//!
//! ## Example
//!
//! ```rust,no_run
//! use docs_bridge::{DocsConfig, DocsIndex, DocsServer, DocsService, HttpFetcher};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Arc::new(DocsConfig::load()?);
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let service = DocsService::new(config, fetcher, DocsIndex::new());
//! service.initialize_index().await;
//! DocsServer::new(service).serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod guidance;
pub mod server;
pub mod service;
pub mod types;
pub mod validation;

pub use server::{DocsServer, error_result, render};
pub use service::{DocsService, MAX_BROWSE_RESULTS, PageCache};
pub use types::{
    BrowseDocsArgs, BrowseDocsOutput, PageOutput, ReadPageArgs, ReadPagesArgs, ReadPagesOutput,
    SearchDocsArgs, SearchDocsOutput, SearchHit, SearchMode,
};
pub use validation::{validate_page_batch, validate_page_url, validate_query};
