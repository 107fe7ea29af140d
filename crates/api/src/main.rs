// Evently API server
// Usage: evently-api [host:port]   (or BIND_ADDR)

use anyhow::{Context, Result};
use clap::Parser;
use evently_api::{build_app, config::Args, open_storage, ServerConfig};
use evently_core::telemetry::{init_telemetry, TelemetryConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Before clap, so BIND_ADDR from .env is visible to it
    if let Ok(path) = dotenvy::dotenv() {
        eprintln!("Loaded environment from {}", path.display());
    }

    // Configure via RUST_LOG / LOG_LEVEL and LOG_FORMAT
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter = Some("evently_api=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    tracing::info!("evently-api starting...");

    let args = Args::parse();

    let config = ServerConfig::from_env()
        .context("Invalid configuration")?
        .with_args(args);

    let store = open_storage(&config)
        .await
        .context("Failed to open event store")?;
    tracing::info!(
        backend = store.kind(),
        url = %config.database_url,
        "Event store ready"
    );

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }

    let store = Arc::new(store);
    let app = build_app(store.clone(), &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    tracing::info!("evently-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
