//! Substitute content for pages that return 404

use crate::search::DocsCatalog;

/// Notice prepended to substitute content, naming the page that was missing
#[must_use]
pub fn not_found_notice(original_url: &str) -> String {
    format!(
        "> **Note:** The requested page {original_url} was not found (HTTP 404). \
         Showing substitute content instead."
    )
}

/// Static guidance document returned when neither the requested page nor the
/// root reference page can be read
#[must_use]
pub fn not_found_guidance(original_url: &str, catalog: &DocsCatalog) -> String {
    let root = catalog.root_reference();
    let mut doc = String::from("# Page not found\n\n");
    doc.push_str(&not_found_notice(original_url));
    doc.push_str("\n\n## Next steps\n\n");
    doc.push_str(
        "- Use `search_docs` with a few keywords to find the current location of this page.\n",
    );
    doc.push_str("- Use `browse_docs` to list the documentation categories.\n");
    doc.push_str(&format!("- Start from the [{}]({}).\n", root.title, root.url));
    doc.push_str("\n## Categories\n\n");
    for category in catalog.all() {
        doc.push_str(&format!("- [{}]({})\n", category.title, category.url));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocsConfig;

    #[test]
    fn test_guidance_names_the_missing_page() {
        let catalog = DocsCatalog::new(&DocsConfig::default());
        let url = "https://developer.tenable.com/reference/gone";
        let doc = not_found_guidance(url, &catalog);

        assert!(doc.starts_with("# Page not found"));
        assert!(doc.contains(&not_found_notice(url)));
        assert!(doc.contains("(https://developer.tenable.com/reference)"));
        assert!(doc.contains("[Scans](https://developer.tenable.com/reference/scans)"));
    }
}
