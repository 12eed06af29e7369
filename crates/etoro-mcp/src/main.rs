//! eToro MCP Server
//!
//! Model Context Protocol server exposing the eToro public API (market data,
//! demo/real trading, social feeds, watchlists, user discovery) to LLM agents
//! over stdio.

use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use etoro_client::GatewayClient;
use etoro_mcp::config::Cli;
use etoro_mcp::server::EtoroMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the JSON-RPC stream; logs go to stderr only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("etoro_mcp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_client_config()?;
    config.log_summary();

    tracing::info!(trading_mode = %config.mode, "etoro-mcp starting (stdio transport)");

    let server = EtoroMcpServer::new(GatewayClient::new(config)?);
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
