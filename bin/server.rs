// Receipt Points - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use receipt_points::{api, logging, ReceiptStore};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "receipt-server", version, about = "Receipt points HTTP API")]
struct ServerConfig {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    logging::init(config.log_json);

    // Lives for the whole process; nothing is persisted
    let store = Arc::new(ReceiptStore::new());
    let app = api::router(store);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(addr = %config.bind, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
