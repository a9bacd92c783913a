//! rmcp server exposing the documentation tools over stdio
//!
//! Every tool call returns `Ok(CallToolResult)`. Domain failures become
//! `isError` results whose text is the JSON `{code, message, details}`
//! payload; they never surface as protocol errors.

use anyhow::{Context, Result};
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorData, Implementation, ProtocolVersion, ServerCapabilities,
        ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use super::service::DocsService;
use super::types::{BrowseDocsArgs, ReadPageArgs, ReadPagesArgs, SearchDocsArgs};
use crate::errors::{DocsError, DocsResult, ErrorKind};

pub const SERVER_NAME: &str = "docs-bridge";

#[derive(Clone)]
pub struct DocsServer {
    service: DocsService,
    tool_router: ToolRouter<Self>,
}

impl DocsServer {
    pub fn new(service: DocsService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    pub fn service(&self) -> &DocsService {
        &self.service
    }

    /// Serve on stdin/stdout until the client disconnects
    pub async fn serve_stdio(self) -> Result<()> {
        let running = self
            .serve(rmcp::transport::stdio())
            .await
            .context("Failed to start MCP server")?;
        running.waiting().await.context("MCP server task failed")?;
        Ok(())
    }
}

#[tool_router]
impl DocsServer {
    #[tool(
        description = "Search the API documentation by keywords. Returns up to 10 pages (url, title, description, category, score), best match first."
    )]
    async fn search_docs(
        &self,
        Parameters(args): Parameters<SearchDocsArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(self.service.search_docs(&args.query), ErrorKind::Search))
    }

    #[tool(
        description = "Read a documentation page and return its main content as Markdown, with title and word count. Only documentation domains are allowed."
    )]
    async fn read_page(
        &self,
        Parameters(args): Parameters<ReadPageArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(
            self.service.read_page(&args.url).await,
            ErrorKind::Scraping,
        ))
    }

    #[tool(
        description = "Read several documentation pages concurrently and return each as Markdown. Fails as a whole if any page fails."
    )]
    async fn read_pages(
        &self,
        Parameters(args): Parameters<ReadPagesArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(
            self.service.read_pages(&args.urls).await,
            ErrorKind::Scraping,
        ))
    }

    #[tool(
        description = "List documentation categories, or the pages filed under one category."
    )]
    async fn browse_docs(
        &self,
        Parameters(args): Parameters<BrowseDocsArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(
            self.service.browse_docs(args.category.as_deref()),
            ErrorKind::Search,
        ))
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Documentation Bridge".to_string()),
                ..Default::default()
            },
            instructions: Some(
                "Use 'search_docs' to find API documentation pages by keyword, 'browse_docs' to \
                 list categories, and 'read_page' or 'read_pages' to read pages as Markdown."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

/// Render a tool outcome. Serialization failures are wrapped into `kind`.
pub fn render<T: Serialize>(outcome: DocsResult<T>, kind: ErrorKind) -> CallToolResult {
    let json = outcome.and_then(|value| {
        serde_json::to_string_pretty(&value).map_err(|e| DocsError::wrap(e.into(), kind))
    });

    match json {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(err) => error_result(&err),
    }
}

/// `isError` result carrying the error's JSON payload
pub fn error_result(err: &DocsError) -> CallToolResult {
    tracing::warn!(code = err.code(), error = %err, "Tool call failed");

    let payload = err.to_payload();
    let text = serde_json::to_string(&payload)
        .unwrap_or_else(|_| format!(r#"{{"code":"{}"}}"#, payload.code));
    CallToolResult::error(vec![Content::text(text)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect()
    }

    #[test]
    fn test_error_result_carries_payload() {
        let err = DocsError::validation("Query must be at least 2 characters");
        let result = error_result(&err);

        assert_eq!(result.is_error, Some(true));
        let json: serde_json::Value =
            serde_json::from_str(&text_of(&result)).expect("payload is JSON");
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Query must be at least 2 characters");
    }

    #[test]
    fn test_render_success() {
        let result = render(Ok(serde_json::json!({"hits": 2})), ErrorKind::Search);
        assert_ne!(result.is_error, Some(true));
        let json: serde_json::Value =
            serde_json::from_str(&text_of(&result)).expect("output is JSON");
        assert_eq!(json["hits"], 2);
    }

    #[test]
    fn test_render_failure_keeps_kind() {
        let outcome: DocsResult<()> = Err(DocsError::network("HTTP 503", None));
        let result = render(outcome, ErrorKind::Scraping);
        assert!(text_of(&result).contains("NETWORK_ERROR"));
    }
}
