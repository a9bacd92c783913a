//! HTML preprocessing before Markdown conversion

pub mod code_block_protection;
pub mod html_cleaning;

pub use code_block_protection::{PreservedCodeMap, preserve_code_blocks, restore_code_blocks};
pub use html_cleaning::{CleanOptions, DEFAULT_KEEP_SELECTORS, DEFAULT_REMOVE_SELECTORS, clean_html};

use anyhow::Result;

/// Clean `html` with every code block shielded from the cleaner.
///
/// Code blocks are restored byte-for-byte after cleaning. A block inside a
/// removed region is dropped together with that region.
pub fn clean_html_preserving_code(html: &str, options: &CleanOptions) -> Result<String> {
    let (protected, preserved) = preserve_code_blocks(html);
    let cleaned = clean_html(&protected, options)?;
    Ok(restore_code_blocks(&cleaned, &preserved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_survives_cleaning_untouched() -> Result<()> {
        let code = r#"<pre><code class="language-html"><nav>   keep me   </nav>
<div></div></code></pre>"#;
        let html = format!(
            "<body><nav>menu</nav><main><div><span></span></div>{code}<p>After</p></main></body>"
        );

        let cleaned = clean_html_preserving_code(&html, &CleanOptions::default())?;
        assert_eq!(cleaned, format!("{code}<p>After</p>"));
        Ok(())
    }

    #[test]
    fn test_placeholder_keeps_its_container_alive() -> Result<()> {
        let html = r#"<main><div class="code-wrapper"><pre>x = 1</pre></div></main>"#;
        let cleaned = clean_html_preserving_code(html, &CleanOptions::default())?;
        assert_eq!(cleaned, r#"<div class="code-wrapper"><pre>x = 1</pre></div>"#);
        Ok(())
    }
}
