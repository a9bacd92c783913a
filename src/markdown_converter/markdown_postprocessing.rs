//! Markdown post-processing: whitespace normalization and word counting

use regex::Regex;
use std::sync::LazyLock;

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("EXCESS_NEWLINES: hardcoded regex is valid"));

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`+[^`\n]*`+").expect("INLINE_CODE: hardcoded regex is valid"));

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Bounded quantifiers prevent catastrophic backtracking
    Regex::new(r"!\[[^\]]{0,500}\]\([^\)]{0,2000}\)").expect("IMAGE_RE: hardcoded regex is valid")
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]{0,500})\]\([^\)]{0,2000}\)").expect("LINK_RE: hardcoded regex is valid")
});

/// Normalize line endings, collapse runs of three or more newlines to one
/// blank line and trim leading/trailing newlines.
///
/// Idempotent.
#[must_use]
pub fn clean_markdown(markdown: &str) -> String {
    let unix = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = EXCESS_NEWLINES.replace_all(&unix, "\n\n");
    collapsed.trim_matches('\n').to_string()
}

/// Count prose words in Markdown.
///
/// Fenced code bodies and inline code spans are ignored, images are removed
/// entirely and links count only their text. Everything else counts as
/// whitespace-separated tokens, Markdown markers included.
#[must_use]
pub fn count_words(markdown: &str) -> usize {
    let prose = strip_fenced_code(markdown);
    let prose = INLINE_CODE.replace_all(&prose, " ");
    let prose = IMAGE_RE.replace_all(&prose, " ");
    let prose = LINK_RE.replace_all(&prose, "$1");
    prose.split_whitespace().count()
}

/// Drop fenced code blocks, fence lines included. An unclosed fence runs to
/// the end of the document.
fn strip_fenced_code(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut open_fence: Option<(char, usize)> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        let fence = fence_marker(trimmed);

        match (open_fence, fence) {
            (None, Some(marker)) => open_fence = Some(marker),
            (None, None) => {
                out.push_str(line);
                out.push('\n');
            }
            (Some((ch, len)), Some((close_ch, close_len)))
                if close_ch == ch
                    && close_len >= len
                    && trimmed.trim_start_matches(ch).trim().is_empty() =>
            {
                open_fence = None;
            }
            (Some(_), _) => {}
        }
    }
    out
}

fn fence_marker(line: &str) -> Option<(char, usize)> {
    let ch = line.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = line.chars().take_while(|c| *c == ch).count();
    (len >= 3).then_some((ch, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_newlines_and_trims() {
        assert_eq!(clean_markdown("\n\n# Title\n\n\n\n\nBody\n\n\n"), "# Title\n\nBody");
        assert_eq!(clean_markdown("a\r\n\r\n\r\nb"), "a\n\nb");
    }

    #[test]
    fn test_keeps_hard_breaks() {
        assert_eq!(clean_markdown("one  \ntwo"), "one  \ntwo");
    }

    #[test]
    fn test_clean_is_idempotent_on_carriage_returns() {
        let once = clean_markdown("\r\r\n\n\rx\r");
        assert_eq!(clean_markdown(&once), once);
    }

    #[test]
    fn test_word_count_skips_code() {
        let md = "Intro words here\n\n```bash\ncurl one two three\n```\n\nRun `ls -la` now";
        assert_eq!(count_words(md), 5);
    }

    #[test]
    fn test_word_count_links_and_images() {
        let md = "See [the scans guide](https://x/y \"t\") ![diagram of flow](/a.png) today";
        assert_eq!(count_words(md), 5);
    }

    #[test]
    fn test_word_count_unclosed_fence() {
        assert_eq!(count_words("Before\n~~~\nnever closed\nstill code"), 1);
    }

    #[test]
    fn test_word_count_includes_markdown_markers() {
        assert_eq!(count_words("# Title\n\n- item one\n\n> quoted"), 7);
    }

    #[test]
    fn test_word_count_empty() {
        assert_eq!(count_words(""), 0);
    }
}
