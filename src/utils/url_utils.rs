//! URL manipulation utilities.
//!
//! Domain allow-listing, link resolution against the documentation origin
//! and cache-key normalization.

use anyhow::Result;
use url::Url;

/// Check whether `host` equals, or is a subdomain of, one of `allowed_domains`.
///
/// Comparison is case-insensitive. `evil-tenable.com` does not match
/// `tenable.com`; `docs.tenable.com` does.
#[must_use]
pub fn is_allowed_host(host: &str, allowed_domains: &[String]) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    allowed_domains.iter().any(|domain| {
        let domain = domain.trim_start_matches('.').to_ascii_lowercase();
        host == domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Check whether a parsed URL points into the allow-listed domains.
#[must_use]
pub fn is_allowed_url(url: &Url, allowed_domains: &[String]) -> bool {
    url.host_str()
        .is_some_and(|host| is_allowed_host(host, allowed_domains))
}

/// Resolve an anchor `href` found on a documentation page.
///
/// Absolute http(s) hrefs are kept as-is, root-relative hrefs are joined
/// against `base`, and everything else (fragment-only, page-relative,
/// protocol-relative, `mailto:`) is skipped.
#[must_use]
pub fn resolve_doc_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        return Url::parse(href).ok();
    }

    if href.starts_with('/') && !href.starts_with("//") {
        return base.join(href).ok();
    }

    None
}

/// Normalize a URL into the key used by the page cache.
///
/// Scheme and host are lowercased by the parser, the fragment is dropped and
/// a trailing slash is trimmed from non-root paths. The query is kept.
pub fn normalize_url(url: &str) -> Result<String> {
    let mut parsed =
        Url::parse(url.trim()).map_err(|e| anyhow::anyhow!("Failed to parse URL: {e}"))?;
    parsed.set_fragment(None);

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    Ok(parsed.to_string())
}
