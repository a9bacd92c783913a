//! Pattern-matching fallback over a fixed category catalog
//!
//! Used when the index is empty, and as the category browser before the index
//! is ready. Never fails: a query that matches nothing still yields the root
//! reference page.

use serde::Serialize;

use crate::config::DocsConfig;
use crate::utils::MAX_SEARCH_RESULTS;

/// Credit for a whole-query substring match against a pattern string
const PHRASE_BONUS: f64 = 0.3;

/// Matches at or below this score are dropped
const MATCH_THRESHOLD: f64 = 0.2;

/// A documentation category and the words that identify it
#[derive(Debug, Clone, Copy)]
pub struct CatalogCategory {
    pub slug: &'static str,
    pub title: &'static str,
    pub pattern: &'static str,
}

pub const CATALOG: &[CatalogCategory] = &[
    CatalogCategory {
        slug: "scans",
        title: "Scans",
        pattern: "scan scans scanner scanners scanning launch schedule policy policies templates results",
    },
    CatalogCategory {
        slug: "assets",
        title: "Assets",
        pattern: "asset assets host hosts inventory discovery tag tags import",
    },
    CatalogCategory {
        slug: "vulnerability-management",
        title: "Vulnerability Management",
        pattern: "vulnerability vulnerabilities vuln vulns findings plugin plugins cve severity remediation",
    },
    CatalogCategory {
        slug: "exports",
        title: "Exports",
        pattern: "export exports bulk chunk chunks download status cancel",
    },
    CatalogCategory {
        slug: "agents",
        title: "Agents",
        pattern: "agent agents agent-groups nessus linking unlink exclusions",
    },
    CatalogCategory {
        slug: "users-and-groups",
        title: "Users and Groups",
        pattern: "user users group groups permission permissions role roles access",
    },
    CatalogCategory {
        slug: "authorization",
        title: "Authorization",
        pattern: "authentication authorization api-keys keys access-key secret-key token headers",
    },
    CatalogCategory {
        slug: "web-app-scanning",
        title: "Web App Scanning",
        pattern: "web application webapp was crawl url attacks",
    },
    CatalogCategory {
        slug: "container-security",
        title: "Container Security",
        pattern: "container containers image images registry repository docker",
    },
    CatalogCategory {
        slug: "audit-log",
        title: "Audit Log",
        pattern: "audit log logs events activity history",
    },
    CatalogCategory {
        slug: "networks",
        title: "Networks",
        pattern: "network networks scanner-groups ranges segmentation",
    },
    CatalogCategory {
        slug: "reports",
        title: "Reports",
        pattern: "report reports dashboard dashboards summary pdf csv",
    },
];

/// One catalog hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogMatch {
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub score: f64,
}

/// The catalog bound to a documentation origin
#[derive(Debug, Clone)]
pub struct DocsCatalog {
    base_url: String,
    root_reference_url: String,
}

impl DocsCatalog {
    #[must_use]
    pub fn new(config: &DocsConfig) -> Self {
        Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            root_reference_url: config.root_reference_url().to_string(),
        }
    }

    /// Score `query` against every catalog pattern.
    ///
    /// Returns at most [`MAX_SEARCH_RESULTS`] matches above the threshold,
    /// best first; when nothing qualifies, a single entry for the root
    /// reference page.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<CatalogMatch> {
        let normalized = query.trim().to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let mut matches: Vec<CatalogMatch> = CATALOG
            .iter()
            .filter_map(|category| {
                let score = pattern_score(&normalized, &words, category.pattern);
                (score > MATCH_THRESHOLD).then(|| self.to_match(category, score))
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(MAX_SEARCH_RESULTS);

        if matches.is_empty() {
            matches.push(self.root_reference());
        }
        matches
    }

    /// Every catalog category with a score of 1.0
    #[must_use]
    pub fn all(&self) -> Vec<CatalogMatch> {
        CATALOG.iter().map(|c| self.to_match(c, 1.0)).collect()
    }

    #[must_use]
    pub fn root_reference(&self) -> CatalogMatch {
        CatalogMatch {
            url: self.root_reference_url.clone(),
            title: "API Reference".to_string(),
            description: "Browse the complete API reference".to_string(),
            category: "api-reference".to_string(),
            score: 0.0,
        }
    }

    fn to_match(&self, category: &CatalogCategory, score: f64) -> CatalogMatch {
        CatalogMatch {
            url: format!("{}/reference/{}", self.base_url, category.slug),
            title: category.title.to_string(),
            description: format!("{} endpoints and guides", category.title),
            category: category.slug.to_string(),
            score,
        }
    }
}

/// Partial credit per query word found in (or equal to) a pattern word, plus
/// a bonus when the whole query occurs in the pattern string. Clamped to 1.0.
fn pattern_score(normalized_query: &str, words: &[&str], pattern: &str) -> f64 {
    if words.is_empty() {
        return 0.0;
    }

    let per_word = 1.0 / words.len() as f64;
    let word_credit: f64 = words
        .iter()
        .filter(|word| pattern.split_whitespace().any(|p| p.contains(**word)))
        .map(|_| per_word)
        .sum();

    let mut score = word_credit.min(1.0);
    if pattern.contains(normalized_query) {
        score += PHRASE_BONUS;
    }
    score.min(1.0)
}
