//! Shared configuration constants for docs-bridge
//!
//! Default values used by the config layer, the search engine and the page
//! pipeline, kept in one place to avoid magic numbers.

/// Origin every root-relative documentation link is resolved against.
pub const DEFAULT_BASE_URL: &str = "https://developer.tenable.com";

/// Root reference page used as the 404 fallback and as the catalog's
/// last-resort search result.
pub const DEFAULT_ROOT_REFERENCE_PATH: &str = "/reference";

/// Hosts (and their subdomains) eligible for page reads.
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &["tenable.com"];

/// Result cache capacity: 100 converted pages
///
/// A converted documentation page is typically 5-50KB of Markdown, so the
/// cache stays well under 10MB at capacity.
pub const DEFAULT_CACHE_MAX_SIZE: usize = 100;

/// Result cache time-to-live: 30 minutes
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60;

/// Interval of the proactive cache sweep: 5 minutes
pub const DEFAULT_CACHE_CLEANUP_INTERVAL_SECS: u64 = 5 * 60;

/// Per-request fetch timeout
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Redirect hops followed before a fetch fails
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Upper bound of pages in one `read_pages` batch
pub const DEFAULT_MAX_BATCH_PAGES: usize = 10;

/// Maximum results returned by a search, in both index and catalog mode
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Trimmed query length bounds (inclusive)
pub const MIN_QUERY_LENGTH: usize = 2;
pub const MAX_QUERY_LENGTH: usize = 200;

/// Description length cap for indexed entries, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Maximum HTML input accepted by the cleaning pipeline (10 MB)
///
/// Typical documentation pages are 100KB-2MB; anything past this limit is
/// rejected before parsing.
pub const MAX_HTML_SIZE: usize = 10 * 1024 * 1024;

/// Default user agent sent with every fetch
pub const USER_AGENT: &str = concat!("docs-bridge/", env!("CARGO_PKG_VERSION"));
