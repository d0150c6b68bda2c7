//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use od_indexer::IndexerError;
use od_ingestion::IngestionError;
use serde::Serialize;
use thiserror::Error;

/// API errors that can be returned to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// Error from the indexer layer.
    #[error("indexer error: {0}")]
    Indexer(#[from] IndexerError),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    /// Status code and machine-readable error code.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Indexer(err) => match err {
                IndexerError::InvalidIdentifier(_) => (StatusCode::BAD_REQUEST, "invalid_identifier"),
                IndexerError::AccountNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                IndexerError::DeadlineExceeded(_) => (StatusCode::GATEWAY_TIMEOUT, "deadline_exceeded"),
                IndexerError::Ingestion(err) => match err {
                    IngestionError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                    IngestionError::RateLimited { .. } => {
                        (StatusCode::TOO_MANY_REQUESTS, "rate_limited")
                    }
                    IngestionError::ServiceUnavailable { .. } => {
                        (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable")
                    }
                    IngestionError::Http { .. }
                    | IngestionError::Network(_)
                    | IngestionError::Parse { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
                    IngestionError::Config(_) | IngestionError::NoData(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                    }
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.classify();

        let details = match &self {
            ApiError::BadRequest(msg) => Some(msg.clone()),
            ApiError::Indexer(e) if status.is_server_error() => {
                tracing::error!("Indexer error: {}", e);
                Some(e.to_string())
            }
            ApiError::Indexer(e) => {
                tracing::debug!("Request rejected: {}", e);
                Some(e.to_string())
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
