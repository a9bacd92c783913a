//! Cleaning, code-block preservation and Markdown conversion

mod common;

use common::doc_page;
use docs_bridge::markdown_converter::{
    CleanOptions, MarkdownOptions, clean_html_preserving_code, clean_markdown, count_words,
    html_to_markdown,
};
use docs_bridge::{PageOptions, convert_page, preserve_code_blocks, restore_code_blocks};
use proptest::prelude::*;

#[test]
fn test_code_inside_removed_looking_markup_is_untouched() -> anyhow::Result<()> {
    let code = "<pre><code class=\"language-html\">&lt;nav class=\"menu\"&gt;\n  <span></span>\n&lt;/nav&gt;</code></pre>";
    let html = format!(
        "<body><nav>site menu</nav><article><div><div></div></div><p>Markup example:</p>{code}</article></body>"
    );

    let cleaned = clean_html_preserving_code(&html, &CleanOptions::default())?;
    assert!(cleaned.contains(code));
    assert!(!cleaned.contains("site menu"));
    assert!(!cleaned.contains("<div></div>"));
    Ok(())
}

#[test]
fn test_custom_remove_selector() -> anyhow::Result<()> {
    let html = r#"<main><div class="feedback">Was this page helpful?</div><p>Body</p></main>"#;
    let options = CleanOptions::default().with_remove_selector(".feedback");

    let cleaned = clean_html_preserving_code(html, &options)?;
    assert_eq!(cleaned, "<p>Body</p>");
    Ok(())
}

#[test]
fn test_rule_table_output() -> anyhow::Result<()> {
    let html = r#"
<h2>Parameters</h2>
<p>Use <code>scan_id</code> and see <a href="/docs/ids" title="IDs">identifiers</a>.</p>
<p></p>
<blockquote><p>Rate limits apply.</p></blockquote>
<p>First line<br>Second line</p>
<hr>
<img src="/img/flow.png" alt="Flow" title="Scan flow">
<table><tr><th>Name</th><th>Type</th></tr><tr><td>id</td><td>integer</td></tr></table>
"#;

    let markdown = html_to_markdown(html, &MarkdownOptions::default())?;
    assert!(markdown.contains("## Parameters"));
    assert!(markdown.contains("`scan_id`"));
    assert!(markdown.contains(r#"[identifiers](/docs/ids "IDs")"#));
    assert!(markdown.contains("> Rate limits apply."));
    assert!(markdown.contains("First line  \nSecond line"));
    assert!(markdown.contains("\n\n---\n\n"));
    assert!(markdown.contains(r#"![Flow](/img/flow.png "Scan flow")"#));
    assert!(markdown.contains("| Name | Type |"));
    assert!(!markdown.contains("\n\n\n"));
    Ok(())
}

#[test]
fn test_convert_page_skips_code_in_word_count() -> anyhow::Result<()> {
    let page = convert_page(
        &doc_page(
            "Export assets",
            "<p>Request an export job.</p><pre><code>POST /assets/export\n{ \"chunk_size\": 100 }</code></pre>",
        ),
        &PageOptions::default(),
    )?;

    // "# Export assets" heading + "Request an export job."
    assert_eq!(page.word_count, 7);
    assert_eq!(page.word_count, count_words(&page.markdown));
    Ok(())
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,\n]{0,30}"
}

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        text().prop_map(|t| format!("<p>{t}</p>")),
        text().prop_map(|t| format!("<pre>{t}</pre>")),
        text().prop_map(|t| format!("<pre><code class=\"language-rust\">{t}</code></pre>")),
        text().prop_map(|t| format!("<code class=\"hljs\">{t}</code>")),
        text().prop_map(|t| format!("<div>{t}</div>")),
    ]
}

proptest! {
    #[test]
    fn clean_markdown_is_idempotent(input in "(?s).{0,200}") {
        let once = clean_markdown(&input);
        prop_assert_eq!(clean_markdown(&once), once);
    }

    #[test]
    fn preserve_then_restore_is_identity(parts in prop::collection::vec(fragment(), 0..8)) {
        let html = parts.concat();
        let (protected, preserved) = preserve_code_blocks(&html);
        prop_assert!(!protected.contains("<pre"));
        prop_assert_eq!(restore_code_blocks(&protected, &preserved), html);
    }

    #[test]
    fn cleaning_never_alters_preserved_code(code in text()) {
        let block = format!("<pre><code class=\"language-text\">{code}</code></pre>");
        let html = format!("<main><div><span></span>{block}</div><nav>{block}</nav></main>");

        let cleaned = clean_html_preserving_code(&html, &CleanOptions::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(cleaned.contains(&block));
        prop_assert!(!cleaned.contains("<nav"));
    }
}
