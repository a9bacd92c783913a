// docs-bridge: documentation search and page-read tools over MCP stdio.
//
// stdout carries the protocol; all logging goes to stderr.

use anyhow::{Context, Result};
use docs_bridge::{DocsConfig, DocsIndex, DocsServer, DocsService, HttpFetcher, PageFetcher};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docs_bridge=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Arc::new(DocsConfig::load().context("Failed to load configuration")?);
    let fetcher: Arc<dyn PageFetcher> =
        Arc::new(HttpFetcher::new(&config).context("Failed to build HTTP client")?);

    let service = DocsService::new(Arc::clone(&config), fetcher, DocsIndex::new());

    // Build the index in the background; searches use the catalog until it is ready
    let indexer = service.clone();
    tokio::spawn(async move {
        indexer.initialize_index().await;
    });

    Arc::clone(service.cache()).start_cleanup_task(config.cache_cleanup_interval());

    tracing::info!(
        base_url = %config.base_url(),
        cache_size = config.cache_max_size(),
        "Starting docs-bridge MCP server on stdio"
    );
    DocsServer::new(service).serve_stdio().await
}
