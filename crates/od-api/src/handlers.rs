//! Route handlers for the API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use od_ingestion::DataSource;
use od_types::{AccountId, ProPlayer, TopPlayer};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{
    ExistsResponse, HealthResponse, LeaderboardResponse, LimitQuery, WrappedResponse,
};

/// Default limit for leaderboard queries.
const DEFAULT_LEADERBOARD_LIMIT: usize = 100;

/// Maximum limit for leaderboard queries.
const MAX_LEADERBOARD_LIMIT: usize = 1000;

/// GET /health - Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /v1/players/:id/wrapped - Build the wrapped aggregate.
pub async fn get_wrapped<S: DataSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<WrappedResponse>, ApiError> {
    let aggregate = state.indexer.build_wrapped(&id).await?;

    if aggregate.is_partial() {
        let sections: Vec<&str> = aggregate.degraded.iter().map(|s| s.as_str()).collect();
        tracing::info!(
            "Serving partial aggregate for {}: {}",
            aggregate.account_id,
            sections.join(", ")
        );
    }

    Ok(Json(aggregate.into()))
}

/// GET /v1/players/:id/exists - Cheap existence check.
pub async fn get_exists<S: DataSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let account_id = AccountId::resolve(&id).map_err(od_indexer::IndexerError::from)?;
    let exists = state.indexer.validate_account(&id).await?;

    Ok(Json(ExistsResponse { account_id, exists }))
}

/// GET /v1/top-players - Global top players.
pub async fn get_top_players<S: DataSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<LeaderboardResponse<TopPlayer>>, ApiError> {
    let limit = leaderboard_limit(&query)?;
    let players = state.indexer.top_players().await?;

    Ok(Json(LeaderboardResponse::truncated(players, limit)))
}

/// GET /v1/pro-players - Professional players.
pub async fn get_pro_players<S: DataSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<LeaderboardResponse<ProPlayer>>, ApiError> {
    let limit = leaderboard_limit(&query)?;
    let players = state.indexer.pro_players().await?;

    Ok(Json(LeaderboardResponse::truncated(players, limit)))
}

fn leaderboard_limit(query: &LimitQuery) -> Result<usize, ApiError> {
    match query.limit {
        Some(0) => Err(ApiError::BadRequest("limit must be positive".to_string())),
        Some(limit) => Ok(limit.min(MAX_LEADERBOARD_LIMIT)),
        None => Ok(DEFAULT_LEADERBOARD_LIMIT),
    }
}
