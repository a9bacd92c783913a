//! HTML to Markdown pipeline for documentation pages
//!
//! 1. **Preprocess**: code blocks are shielded, boilerplate is removed and
//!    the markup is narrowed to the main content region.
//! 2. **Convert**: htmd with this crate's rule table.
//! 3. **Post-process**: newline normalization and word counting.
//!
//! Conversion either produces the whole document or fails; there is no
//! partial result.

pub mod html_preprocessing;
pub mod html_to_markdown;
pub mod markdown_postprocessing;

pub use html_preprocessing::{
    CleanOptions, PreservedCodeMap, clean_html, clean_html_preserving_code, preserve_code_blocks,
    restore_code_blocks,
};
pub use html_to_markdown::{
    BulletMarker, ConversionRule, FenceStyle, HeadingStyle, MarkdownOptions, conversion_rules,
};
pub use markdown_postprocessing::{clean_markdown, count_words};

use scraper::{Html, Selector};
use serde::Serialize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use crate::errors::{DocsError, DocsResult, ErrorKind};
use crate::utils::MAX_HTML_SIZE;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("BUG: hardcoded CSS selector 'title' is invalid")
});

static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1").expect("BUG: hardcoded CSS selector 'h1' is invalid")
});

/// Failure of the Markdown transform itself
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Markdown transform failed: {0}")]
    Transform(#[from] std::io::Error),

    #[error("Markdown transform panicked: {0}")]
    Panicked(String),
}

impl From<ConversionError> for DocsError {
    fn from(err: ConversionError) -> Self {
        DocsError::conversion("Failed to convert page to Markdown", Some(err.to_string()))
    }
}

/// Markdown plus its prose word count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownWithStats {
    pub markdown: String,
    pub word_count: usize,
}

/// Convert cleaned markup to normalized Markdown.
pub fn html_to_markdown(html: &str, options: &MarkdownOptions) -> Result<String, ConversionError> {
    let options = *options;
    let raw = guarded_transform(|| html_to_markdown::convert_with_rules(html, options))?;
    Ok(clean_markdown(&raw))
}

/// Run a transform, turning both its I/O error and any panic inside a rule
/// into a [`ConversionError`]
fn guarded_transform<F>(transform: F) -> Result<String, ConversionError>
where
    F: FnOnce() -> std::io::Result<String>,
{
    catch_unwind(AssertUnwindSafe(transform))
        .map_err(|panic| ConversionError::Panicked(panic_message(panic.as_ref())))?
        .map_err(ConversionError::from)
}

/// [`html_to_markdown`] plus the word count of the result
pub fn html_to_markdown_with_stats(
    html: &str,
    options: &MarkdownOptions,
) -> Result<MarkdownWithStats, ConversionError> {
    let markdown = html_to_markdown(html, options)?;
    let word_count = count_words(&markdown);
    Ok(MarkdownWithStats {
        markdown,
        word_count,
    })
}

/// Cleaning and conversion settings for a whole page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub clean: CleanOptions,
    pub markdown: MarkdownOptions,
}

/// A documentation page rendered as Markdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedPage {
    /// `<title>`, or the first `<h1>` when the title is missing
    pub title: Option<String>,
    pub markdown: String,
    pub word_count: usize,
}

/// Run the full page pipeline on raw page markup.
///
/// Oversized input and cleaning failures are scraping errors; transform
/// failures are conversion errors.
pub fn convert_page(html: &str, options: &PageOptions) -> DocsResult<ConvertedPage> {
    if html.len() > MAX_HTML_SIZE {
        return Err(DocsError::scraping(
            "Page content too large",
            Some(format!(
                "{} bytes exceeds the {} byte limit",
                html.len(),
                MAX_HTML_SIZE
            )),
        ));
    }

    let title = extract_title(html);
    let cleaned = clean_html_preserving_code(html, &options.clean)
        .map_err(|e| DocsError::wrap(e, ErrorKind::Scraping))?;
    let MarkdownWithStats {
        markdown,
        word_count,
    } = html_to_markdown_with_stats(&cleaned, &options.markdown)?;

    Ok(ConvertedPage {
        title,
        markdown,
        word_count,
    })
}

/// [`convert_page`] on the blocking thread pool
pub async fn convert_page_async(html: &str, options: &PageOptions) -> DocsResult<ConvertedPage> {
    let html = Arc::<str>::from(html);
    let options = options.clone();

    tokio::task::spawn_blocking(move || convert_page(&html, &options))
        .await
        .map_err(|e| {
            DocsError::conversion(
                "Failed to convert page to Markdown",
                Some(format!("Conversion task failed: {e}")),
            )
        })?
}

/// Document `<title>`, falling back to the first `<h1>`
#[must_use]
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    [&*TITLE_SELECTOR, &*H1_SELECTOR]
        .into_iter()
        .filter_map(|selector| document.select(selector).next())
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .find(|text| !text.is_empty())
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
