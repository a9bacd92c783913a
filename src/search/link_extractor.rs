//! Documentation link discovery
//!
//! Turns the anchors of a fetched seed page into [`IndexedEntry`] values:
//! resolved absolute URL, title, short description and keyword set.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::keywords::{extract_keywords, extract_url_keywords};
use super::types::IndexedEntry;
use crate::utils::{MAX_DESCRIPTION_CHARS, is_allowed_url, resolve_doc_href};

/// Description used when neither a following paragraph nor the enclosing
/// container yields usable text
pub const PLACEHOLDER_DESCRIPTION: &str = "Documentation page";

/// Container text shorter than this is not used as a description
const MIN_CONTAINER_TEXT_CHARS: usize = 40;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("BUG: hardcoded CSS selector 'a[href]' is invalid")
});

/// Extract every allow-listed documentation link from `markup`.
///
/// Anchors without an href or without visible text are skipped, as are hrefs
/// that are neither absolute http(s) nor root-relative. Duplicates are kept;
/// the index build deduplicates by URL.
#[must_use]
pub fn extract_doc_links(
    markup: &str,
    category: &str,
    base: &Url,
    allowed_domains: &[String],
) -> Vec<IndexedEntry> {
    let document = Html::parse_document(markup);
    let mut entries = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.trim().is_empty() {
            continue;
        }

        let text = collapse_whitespace(&anchor.text().collect::<String>());
        if text.is_empty() {
            continue;
        }

        let Some(url) = resolve_doc_href(href, base) else {
            continue;
        };
        if !is_allowed_url(&url, allowed_domains) {
            continue;
        }

        let title = derive_title(&anchor, text);
        let description = derive_description(&anchor);

        let mut keywords = extract_url_keywords(url.path());
        keywords.extend(extract_keywords(&title));

        entries.push(IndexedEntry {
            url: url.to_string(),
            title,
            description,
            category: category.to_string(),
            keywords,
        });
    }

    entries
}

/// Link text, or the nearest ancestor heading when the link text is only
/// symbols (permalink anchors such as `#` or `¶`).
fn derive_title(anchor: &ElementRef, link_text: String) -> String {
    if link_text.chars().any(char::is_alphanumeric) {
        return link_text;
    }

    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| is_heading(el.value().name()))
        .map(|heading| collapse_whitespace(&heading.text().collect::<String>()))
        .filter(|heading_text| !heading_text.is_empty())
        .unwrap_or(link_text)
}

fn derive_description(anchor: &ElementRef) -> String {
    if let Some(paragraph) = anchor
        .next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "p")
    {
        let text = collapse_whitespace(&paragraph.text().collect::<String>());
        if !text.is_empty() {
            return truncate_chars(&text, MAX_DESCRIPTION_CHARS);
        }
    }

    if let Some(container) = anchor.parent().and_then(ElementRef::wrap) {
        let text = collapse_whitespace(&container.text().collect::<String>());
        if text.chars().count() >= MIN_CONTAINER_TEXT_CHARS {
            return truncate_chars(&text, MAX_DESCRIPTION_CHARS);
        }
    }

    PLACEHOLDER_DESCRIPTION.to_string()
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
