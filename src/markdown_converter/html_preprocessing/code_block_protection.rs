//! Code block protection during HTML cleaning
//!
//! `<pre>` blocks and language-tagged `<code>` elements are swapped for
//! opaque placeholder tokens before the markup is parsed and cleaned, then
//! swapped back afterwards. The protected markup never passes through the
//! DOM, so cleaning cannot alter whitespace, attributes or nested tags inside
//! a code sample.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// `<pre>` blocks (with any nested markup) and `<code>` elements whose class
/// marks a language or highlighter
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<pre\b[^>]*>.*?</pre\s*>|<code\b[^>]*\bclass\s*=\s*["'][^"']*\b(?:language-|lang-|highlight|hljs)[^"']*["'][^>]*>.*?</code\s*>"#,
    )
    .expect("CODE_BLOCK regex is valid")
});

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__CODE_BLOCK_\d+__").expect("PLACEHOLDER regex is valid"));

/// Placeholder token to original markup, scoped to one cleaning operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreservedCodeMap {
    blocks: HashMap<String, String>,
}

impl PreservedCodeMap {
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.blocks.get(token).map(String::as_str)
    }
}

fn placeholder(n: usize) -> String {
    format!("__CODE_BLOCK_{n}__")
}

/// Replace every code block with `__CODE_BLOCK_<n>__`, numbered in document
/// order from 0.
#[must_use]
pub fn preserve_code_blocks(html: &str) -> (String, PreservedCodeMap) {
    let mut map = PreservedCodeMap::default();

    let replaced = CODE_BLOCK.replace_all(html, |caps: &Captures| {
        let token = placeholder(map.blocks.len());
        map.blocks.insert(token.clone(), caps[0].to_string());
        token
    });

    (replaced.into_owned(), map)
}

/// Substitute every known placeholder with its original markup.
///
/// Substitution is a single pass, so restored code is never rescanned for
/// tokens. Unknown tokens are left untouched.
#[must_use]
pub fn restore_code_blocks(html: &str, map: &PreservedCodeMap) -> String {
    if map.is_empty() {
        return html.to_string();
    }

    PLACEHOLDER
        .replace_all(html, |caps: &Captures| {
            map.get(&caps[0]).unwrap_or(&caps[0]).to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_spaces_in_shell_commands() {
        let html = r#"<p>Run:</p><pre><code class="language-bash">export TIO_ACCESS_KEY=abc
curl -s  https://cloud.tenable.com/scans   # list</code></pre>"#;

        let (protected, map) = preserve_code_blocks(html);
        assert_eq!(protected, "<p>Run:</p>__CODE_BLOCK_0__");
        assert_eq!(map.len(), 1);

        let restored = restore_code_blocks(&protected, &map);
        assert_eq!(restored, html);
    }

    #[test]
    fn test_multiple_blocks_numbered_in_order() {
        let html = r#"<pre>one</pre><p>Use <code class="hljs json">{"a":1}</code> or <code>plain</code></p><pre class="x">two</pre>"#;

        let (protected, map) = preserve_code_blocks(html);
        assert_eq!(
            protected,
            "__CODE_BLOCK_0__<p>Use __CODE_BLOCK_1__ or <code>plain</code></p>__CODE_BLOCK_2__"
        );
        assert_eq!(map.get("__CODE_BLOCK_0__"), Some("<pre>one</pre>"));
        assert_eq!(map.get("__CODE_BLOCK_2__"), Some(r#"<pre class="x">two</pre>"#));
        assert_eq!(restore_code_blocks(&protected, &map), html);
    }

    #[test]
    fn test_restore_is_order_independent() {
        let html = "<pre>a</pre><pre>b</pre>";
        let (_, map) = preserve_code_blocks(html);
        let swapped = "__CODE_BLOCK_1__|__CODE_BLOCK_0__";
        assert_eq!(restore_code_blocks(swapped, &map), "<pre>b</pre>|<pre>a</pre>");
    }

    #[test]
    fn test_restored_code_is_not_rescanned() {
        let html = "<pre>__CODE_BLOCK_0__</pre>";
        let (protected, map) = preserve_code_blocks(html);
        assert_eq!(restore_code_blocks(&protected, &map), html);
    }

    #[test]
    fn test_no_code_blocks() {
        let html = "<div><p>Nothing to protect</p></div>";
        let (protected, map) = preserve_code_blocks(html);
        assert_eq!(protected, html);
        assert!(map.is_empty());
    }
}
