//! Keyword extraction for indexing and querying
//!
//! The same pipeline runs over link titles, URL paths and search queries, so a
//! query token matches a posting only if both sides normalize identically.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Tokens dropped regardless of length
pub const STOPWORDS: &[&str] = &["and", "the", "for", "with", "api"];

/// Tokens this short (in chars) carry no signal
const MAX_DISCARDED_TOKEN_LEN: usize = 2;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("NON_WORD: hardcoded regex is valid"));

/// Extract the normalized keyword set of free text.
///
/// Lowercases, strips every character that is neither a word character, a
/// hyphen nor whitespace, splits on whitespace and drops short tokens and
/// stopwords. Never fails; empty input yields an empty set.
#[must_use]
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");

    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() > MAX_DISCARDED_TOKEN_LEN)
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Extract keywords from a URL path.
///
/// Path separators, hyphens and underscores become word boundaries first, so
/// `/reference/vulnerability-management` yields `reference`, `vulnerability`
/// and `management`.
#[must_use]
pub fn extract_url_keywords(path: &str) -> BTreeSet<String> {
    let spaced: String = path
        .chars()
        .map(|c| if matches!(c, '/' | '-' | '_') { ' ' } else { c })
        .collect();
    extract_keywords(&spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_lowercases_and_filters() {
        let keywords = extract_keywords("List the Scans for an Asset with API");
        assert_eq!(keywords, set(&["list", "scans", "asset"]));
    }

    #[test]
    fn test_strips_punctuation_but_keeps_hyphens() {
        let keywords = extract_keywords("Export (vulns): agent-groups, v3!");
        assert_eq!(keywords, set(&["export", "vulns", "agent-groups"]));
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   a an to  ").is_empty());
    }

    #[test]
    fn test_url_path_keywords() {
        let keywords = extract_url_keywords("/reference/vulnerability_management-export");
        assert_eq!(
            keywords,
            set(&["reference", "vulnerability", "management", "export"])
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Scan policies and scanner groups";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }
}
