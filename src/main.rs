use anyhow::Context;
use kagi_mcp::config::Config;
use kagi_mcp::kagi::KagiClient;
use kagi_mcp::tools::{KagiServer, ToolDispatcher};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing_subscriber::{self, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Kagi MCP server...");

    let config = Config::from_env();
    config.log_summary();

    let client = KagiClient::new(config.client_config()).context("Failed to create Kagi client")?;
    let dispatcher = ToolDispatcher::new(&config, Arc::new(client));

    let service = KagiServer::new(dispatcher)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    tracing::info!("Server initialized successfully");
    service.waiting().await?;
    Ok(())
}
