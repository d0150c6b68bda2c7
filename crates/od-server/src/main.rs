//! od-server: Main binary for the OpenDota wrapped service.
//!
//! This binary wires together all crates and starts the HTTP server.

use anyhow::Context;
use od_api::{create_router, AppState};
use od_indexer::{Indexer, IndexerConfig};
use od_ingestion::ClientConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default port for the server.
const DEFAULT_PORT: u16 = 3000;

/// Default host for the server.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default budget for one wrapped build.
const DEFAULT_WRAPPED_DEADLINE_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "od_server=info,od_api=info,od_indexer=info,od_ingestion=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let deadline_secs: u64 = std::env::var("WRAPPED_DEADLINE_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_WRAPPED_DEADLINE_SECS);

    let client = ClientConfig::from_env();

    tracing::info!(
        "Starting od-server on {}:{} (upstream: {}, api key: {}, max in flight: {}, deadline: {}s)",
        host,
        port,
        client.base_url,
        if client.api_key.is_some() { "set" } else { "none" },
        client.max_in_flight,
        deadline_secs
    );

    let config = IndexerConfig::default()
        .with_client(client)
        .with_deadline(Duration::from_secs(deadline_secs));

    let indexer = Indexer::new(config).context("failed to create OpenDota client")?;

    // Create app state
    let state = Arc::new(AppState::new(indexer));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health                   - Health check");
    tracing::info!("  GET /v1/players/:id/wrapped   - Wrapped aggregate");
    tracing::info!("  GET /v1/players/:id/exists    - Account existence check");
    tracing::info!("  GET /v1/top-players           - Global top players");
    tracing::info!("  GET /v1/pro-players           - Professional players");

    axum::serve(listener, app).await?;

    Ok(())
}
