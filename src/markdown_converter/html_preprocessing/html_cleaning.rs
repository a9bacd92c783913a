//! Boilerplate removal and main-content narrowing
//!
//! Cleaning works on an immutable scraper DOM: removed and pruned elements
//! are collected into a `NodeId` set, and the working root is serialized once
//! while skipping everything in that set.

use anyhow::{Result, anyhow};
use ego_tree::NodeId;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::utils::MAX_HTML_SIZE;

/// Maximum element nesting followed during pruning and serialization
const MAX_HTML_NESTING_DEPTH: usize = 100;

/// Elements without content by definition; never pruned as empty
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements kept even when empty so table and media structure survives
const NEVER_PRUNED: &[&str] = &["td", "th", "iframe", "video", "audio", "svg", "canvas"];

pub const DEFAULT_REMOVE_SELECTORS: &[&str] = &[
    "nav",
    "header",
    "footer",
    "aside",
    "script",
    "style",
    "noscript",
    "form",
    "[role='navigation']",
    "[role='banner']",
    "[role='contentinfo']",
    "[role='search']",
    ".sidebar",
    "#sidebar",
    ".navigation",
    ".navbar",
    ".header",
    ".footer",
    ".breadcrumb",
    ".breadcrumbs",
    ".menu",
    ".pagination",
    ".pager",
    ".search",
    ".search-box",
    ".ads",
    ".advertisement",
    ".cookie-banner",
    ".cookie-notice",
    ".newsletter",
    ".newsletter-signup",
];

pub const DEFAULT_KEEP_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    "#main-content",
    ".main-content",
    "#content",
    ".content",
    ".markdown-body",
    ".post-content",
    ".entry-content",
    "[itemprop='articleBody']",
    ".article-body",
];

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("body").expect("BUG: hardcoded CSS selector 'body' is invalid")
});

/// Remove-list and keep-list used by [`clean_html`]
///
/// Keep selectors are tried in order; the first one that matches an element
/// surviving removal becomes the working root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    pub remove_selectors: Vec<String>,
    pub keep_selectors: Vec<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            remove_selectors: DEFAULT_REMOVE_SELECTORS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            keep_selectors: DEFAULT_KEEP_SELECTORS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl CleanOptions {
    #[must_use]
    pub fn with_remove_selector(mut self, selector: impl Into<String>) -> Self {
        self.remove_selectors.push(selector.into());
        self
    }

    #[must_use]
    pub fn with_keep_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }
}

/// Strip boilerplate from `html` and return the serialized content region.
///
/// 1. Every element matching a remove selector is dropped with its subtree.
/// 2. The working root is the first keep-selector match, else `<body>`, else
///    the whole document.
/// 3. Inside the root, elements left without child elements or text are
///    pruned, bottom-up.
///
/// Invalid selectors are skipped with a warning.
pub fn clean_html(html: &str, options: &CleanOptions) -> Result<String> {
    if html.len() > MAX_HTML_SIZE {
        return Err(anyhow!(
            "HTML input too large: {} bytes (maximum {} bytes)",
            html.len(),
            MAX_HTML_SIZE
        ));
    }

    let document = Html::parse_document(html);

    let mut removed: HashSet<NodeId> = HashSet::new();
    for selector in parse_selectors(&options.remove_selectors) {
        for element in document.select(&selector) {
            removed.insert(element.id());
        }
    }

    let root = select_working_root(&document, &options.keep_selectors, &removed);

    let mut skipped = removed;
    collect_empty_elements(&root, &mut skipped, 0);

    let mut output = String::with_capacity(html.len() / 2);
    serialize_children(&root, &skipped, &mut output, 0);
    Ok(output)
}

fn parse_selectors(selectors: &[String]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|raw| match Selector::parse(raw) {
            Ok(selector) => Some(selector),
            Err(e) => {
                log::warn!("Ignoring invalid CSS selector '{raw}': {e}");
                None
            }
        })
        .collect()
}

fn select_working_root<'a>(
    document: &'a Html,
    keep_selectors: &[String],
    removed: &HashSet<NodeId>,
) -> ElementRef<'a> {
    let survives = |element: &ElementRef| {
        !removed.contains(&element.id())
            && !element.ancestors().any(|a| removed.contains(&a.id()))
    };

    for selector in parse_selectors(keep_selectors) {
        if let Some(element) = document.select(&selector).find(|el| survives(el)) {
            return element;
        }
    }

    document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element())
}

/// Mark empty elements under `element`; returns whether `element` itself has
/// any surviving content.
fn collect_empty_elements(
    element: &ElementRef,
    skipped: &mut HashSet<NodeId>,
    depth: usize,
) -> bool {
    if depth > MAX_HTML_NESTING_DEPTH {
        return true;
    }

    let mut has_content = false;
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if !text.trim().is_empty() {
                    has_content = true;
                }
            }
            Node::Element(el) => {
                if skipped.contains(&child.id()) {
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.name();
                let kept = VOID_ELEMENTS.contains(&name) || NEVER_PRUNED.contains(&name);
                let child_has_content =
                    collect_empty_elements(&child_element, skipped, depth + 1);
                if child_has_content || kept {
                    has_content = true;
                } else {
                    skipped.insert(child.id());
                }
            }
            _ => {}
        }
    }
    has_content
}

fn serialize_children(
    element: &ElementRef,
    skipped: &HashSet<NodeId>,
    output: &mut String,
    depth: usize,
) {
    if depth > MAX_HTML_NESTING_DEPTH {
        tracing::warn!(
            element = element.value().name(),
            limit = MAX_HTML_NESTING_DEPTH,
            "Maximum HTML nesting depth exceeded, truncating"
        );
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_escaped_text(output, text),
            Node::Element(_) => {
                if skipped.contains(&child.id()) {
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child_element.value().name();

                output.push('<');
                output.push_str(name);
                for (attr, value) in child_element.value().attrs() {
                    output.push(' ');
                    output.push_str(attr);
                    output.push_str("=\"");
                    push_escaped_attr(output, value);
                    output.push('"');
                }
                output.push('>');

                if VOID_ELEMENTS.contains(&name) {
                    continue;
                }

                serialize_children(&child_element, skipped, output, depth + 1);

                output.push_str("</");
                output.push_str(name);
                output.push('>');
            }
            Node::Comment(comment) => {
                output.push_str("<!--");
                output.push_str(comment);
                output.push_str("-->");
            }
            _ => {}
        }
    }
}

fn push_escaped_text(output: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '&' => output.push_str("&amp;"),
            c => output.push(c),
        }
    }
}

fn push_escaped_attr(output: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '"' => output.push_str("&quot;"),
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            c => output.push(c),
        }
    }
}
