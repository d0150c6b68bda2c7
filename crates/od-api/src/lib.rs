//! od-api: HTTP API layer for the OpenDota wrapped service
//!
//! This crate defines the REST API endpoints:
//! - GET /health
//! - GET /v1/players/:id/wrapped
//! - GET /v1/players/:id/exists
//! - GET /v1/top-players
//! - GET /v1/pro-players
//!
//! `:id` is either a 32-bit account id or a 64-bit Steam community id.

mod error;
mod handlers;
mod state;
mod types;

pub use error::ApiError;
pub use state::AppState;
pub use types::{
    ExistsResponse, HealthResponse, LeaderboardResponse, LimitQuery, WrappedResponse,
};

use axum::{routing::get, Router};
use od_ingestion::DataSource;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router.
pub fn create_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: DataSource + 'static,
{
    Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/players/:id/wrapped", get(handlers::get_wrapped::<S>))
        .route("/v1/players/:id/exists", get(handlers::get_exists::<S>))
        .route("/v1/top-players", get(handlers::get_top_players::<S>))
        .route("/v1/pro-players", get(handlers::get_pro_players::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
