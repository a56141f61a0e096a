use std::sync::Arc;

use oura_client::config::Config;
use oura_client::http_client::ReqwestOuraClient;
use oura_mcp::OuraMcpHandler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `OURA_MCP_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("OURA_MCP_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    // Append per-target overrides to keep rmcp internals quiet by default
    let combined_filter = format!("{},rmcp=warn,serve_inner=warn", log_env);
    let env_filter = tracing_subscriber::EnvFilter::try_new(combined_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,rmcp=warn,serve_inner=warn"));
    // Logs go to stderr; stdout belongs to the MCP transport.
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("oura_mcp: log filter: {}", log_env);

    // Missing token is a startup-time fatal error, not a per-call one.
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!("oura_mcp: {e}; set OURA_API_TOKEN and restart");
    })?;

    let client = ReqwestOuraClient::from_config(&config);
    let handler = OuraMcpHandler::new(Arc::new(client));
    tracing::info!("oura_mcp: registered {} tools", handler.tool_count());

    // Start RMCP server over stdio transport so it's immediately usable with MCP clients
    tracing::info!("oura_mcp: starting stdio MCP server...");

    use rmcp::serve_server;
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let server = serve_server(handler, transport).await?;

    tracing::info!("oura_mcp: service initialized as server");

    server.waiting().await?;

    Ok(())
}
