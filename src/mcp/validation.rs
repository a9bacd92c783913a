//! Tool input validation
//!
//! Runs before any index lookup or network call. Failures are always
//! [`DocsError::Validation`] and are never wrapped further.

use url::Url;

use crate::errors::{DocsError, DocsResult};
use crate::utils::{MAX_QUERY_LENGTH, MIN_QUERY_LENGTH, is_allowed_url};

/// Trim `query` and check its length in characters
pub fn validate_query(query: &str) -> DocsResult<&str> {
    let trimmed = query.trim();
    let length = trimmed.chars().count();

    if length < MIN_QUERY_LENGTH {
        return Err(DocsError::validation(format!(
            "Query must be at least {MIN_QUERY_LENGTH} characters"
        )));
    }
    if length > MAX_QUERY_LENGTH {
        return Err(DocsError::validation(format!(
            "Query must be at most {MAX_QUERY_LENGTH} characters (got {length})"
        )));
    }
    Ok(trimmed)
}

/// Parse `url` and require an http(s) URL on an allow-listed host
pub fn validate_page_url(url: &str, allowed_domains: &[String]) -> DocsResult<Url> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|e| DocsError::validation(format!("Invalid URL '{trimmed}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DocsError::validation(format!(
            "URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    if !is_allowed_url(&parsed, allowed_domains) {
        return Err(DocsError::validation(format!(
            "URL host '{}' is not an allowed documentation domain (allowed: {})",
            parsed.host_str().unwrap_or_default(),
            allowed_domains.join(", ")
        )));
    }

    Ok(parsed)
}

/// Validate a batch of page URLs: non-empty, at most `max_pages`, every URL allowed
pub fn validate_page_batch(
    urls: &[String],
    max_pages: usize,
    allowed_domains: &[String],
) -> DocsResult<Vec<Url>> {
    if urls.is_empty() {
        return Err(DocsError::validation("At least one URL is required"));
    }
    if urls.len() > max_pages {
        return Err(DocsError::validation(format!(
            "At most {max_pages} pages can be read at once (got {})",
            urls.len()
        )));
    }

    urls.iter()
        .map(|url| validate_page_url(url, allowed_domains))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn allowed() -> Vec<String> {
        vec!["tenable.com".to_string()]
    }

    #[test]
    fn test_query_length_bounds() {
        assert_eq!(validate_query("  scans  ").ok(), Some("scans"));
        assert_eq!(validate_query("ab").ok(), Some("ab"));
        assert!(validate_query(" a ").is_err());
        assert!(validate_query("").is_err());
        assert!(validate_query(&"x".repeat(200)).is_ok());

        let err = validate_query(&"x".repeat(201)).expect_err("too long");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_query_length_counts_characters() {
        assert!(validate_query(&"é".repeat(200)).is_ok());
    }

    #[test]
    fn test_page_url_rules() {
        assert!(validate_page_url("https://developer.tenable.com/reference", &allowed()).is_ok());
        assert!(validate_page_url("http://docs.tenable.com/x", &allowed()).is_ok());

        for bad in [
            "ftp://developer.tenable.com/x",
            "https://example.org/reference",
            "https://evil-tenable.com/",
            "/reference/scans",
            "not a url",
        ] {
            let err = validate_page_url(bad, &allowed()).expect_err(bad);
            assert_eq!(err.kind(), ErrorKind::Validation, "{bad}");
        }
    }

    #[test]
    fn test_batch_limits() {
        let one = vec!["https://developer.tenable.com/a".to_string()];
        assert_eq!(validate_page_batch(&one, 2, &allowed()).map(|u| u.len()).ok(), Some(1));

        assert!(validate_page_batch(&[], 2, &allowed()).is_err());

        let three = vec![one[0].clone(), one[0].clone(), one[0].clone()];
        assert!(validate_page_batch(&three, 2, &allowed()).is_err());

        let mixed = vec![one[0].clone(), "https://example.org/".to_string()];
        assert!(validate_page_batch(&mixed, 2, &allowed()).is_err());
    }
}
