//! Error types for docs-bridge tool operations
//!
//! Every failure that can reach the MCP boundary is a [`DocsError`]. The
//! variant is the error kind; the transport layer matches on it to produce a
//! stable machine-readable code instead of inspecting error types at runtime.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for tool operations
pub type DocsResult<T> = Result<T, DocsError>;

/// Error kind taxonomy, independent of message content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Network,
    Scraping,
    Conversion,
    Search,
}

impl ErrorKind {
    /// Stable code rendered in error payloads
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Network => "NETWORK_ERROR",
            Self::Scraping => "SCRAPING_ERROR",
            Self::Conversion => "CONVERSION_ERROR",
            Self::Search => "SEARCH_ERROR",
        }
    }

    /// Build an error of this kind
    pub fn error(self, message: impl Into<String>, details: Option<String>) -> DocsError {
        let message = message.into();
        match self {
            Self::Validation => DocsError::Validation { message, details },
            Self::Network => DocsError::Network { message, details },
            Self::Scraping => DocsError::Scraping { message, details },
            Self::Conversion => DocsError::Conversion { message, details },
            Self::Search => DocsError::Search { message, details },
        }
    }
}

/// Recognised tool errors
#[derive(Debug, Clone, Error)]
pub enum DocsError {
    /// Malformed or out-of-range input (query length, URL scheme, domain)
    #[error("Invalid input: {message}")]
    Validation {
        message: String,
        details: Option<String>,
    },

    /// Fetch failure, timeout, or non-success status past the 404 fallback
    #[error("Network error: {message}")]
    Network {
        message: String,
        details: Option<String>,
    },

    /// Cleaning pipeline failure or content-length guard
    #[error("Scraping failed: {message}")]
    Scraping {
        message: String,
        details: Option<String>,
    },

    /// Markdown transform failure
    #[error("Markdown conversion failed: {message}")]
    Conversion {
        message: String,
        details: Option<String>,
    },

    /// Index or search pipeline failure other than validation
    #[error("Search failed: {message}")]
    Search {
        message: String,
        details: Option<String>,
    },
}

/// Structured error rendered at the transport boundary
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorPayload {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl DocsError {
    pub fn validation(message: impl Into<String>) -> Self {
        ErrorKind::Validation.error(message, None)
    }

    pub fn network(message: impl Into<String>, details: Option<String>) -> Self {
        ErrorKind::Network.error(message, details)
    }

    pub fn scraping(message: impl Into<String>, details: Option<String>) -> Self {
        ErrorKind::Scraping.error(message, details)
    }

    pub fn conversion(message: impl Into<String>, details: Option<String>) -> Self {
        ErrorKind::Conversion.error(message, details)
    }

    pub fn search(message: impl Into<String>, details: Option<String>) -> Self {
        ErrorKind::Search.error(message, details)
    }

    /// Wrap an opaque failure into `fallback`, unless it already is a
    /// recognised [`DocsError`], which passes through unchanged.
    #[must_use]
    pub fn wrap(error: anyhow::Error, fallback: ErrorKind) -> Self {
        match error.downcast::<DocsError>() {
            Ok(known) => known,
            Err(other) => {
                let message = match fallback {
                    ErrorKind::Validation => "Input rejected",
                    ErrorKind::Network => "Request failed",
                    ErrorKind::Scraping => "Failed to extract page content",
                    ErrorKind::Conversion => "Failed to convert page to Markdown",
                    ErrorKind::Search => "Search pipeline failed",
                };
                fallback.error(message, Some(format!("{other:#}")))
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Network { .. } => ErrorKind::Network,
            Self::Scraping { .. } => ErrorKind::Scraping,
            Self::Conversion { .. } => ErrorKind::Conversion,
            Self::Search { .. } => ErrorKind::Search,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Network { message, .. }
            | Self::Scraping { message, .. }
            | Self::Conversion { message, .. }
            | Self::Search { message, .. } => message,
        }
    }

    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Validation { details, .. }
            | Self::Network { details, .. }
            | Self::Scraping { details, .. }
            | Self::Conversion { details, .. }
            | Self::Search { details, .. } => details.as_deref(),
        }
    }

    #[must_use]
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code(),
            message: self.message().to_string(),
            details: self.details().map(str::to_string),
        }
    }
}
