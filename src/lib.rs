//! Documentation bridge: keyword search and Markdown page reads over a single
//! documentation domain, exposed as MCP tools.

pub mod cache;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod markdown_converter;
pub mod mcp;
pub mod search;
pub mod utils;

pub use cache::{CacheEntry, CacheStats, ResultCache};
pub use config::{DocsConfig, DocsConfigBuilder, SeedPage};
pub use errors::{DocsError, DocsResult, ErrorKind, ErrorPayload};
pub use fetcher::{FetchError, FetchOptions, FetchedPage, HttpFetcher, PageFetcher};
pub use markdown_converter::{
    ConvertedPage, MarkdownOptions, PageOptions, clean_html, convert_page, convert_page_async,
    html_to_markdown, preserve_code_blocks, restore_code_blocks,
};
pub use mcp::{DocsServer, DocsService, PageOutput, SearchMode};
pub use search::{DocsCatalog, DocsIndex, IndexedEntry, SearchIndex, extract_keywords};
