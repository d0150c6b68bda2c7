//! Error types for the ingestion layer.
//!
//! Each variant owns its data as plain strings and integers. External
//! errors (`reqwest`, `serde_json`) are flattened into messages at the
//! boundary, so the enum carries no boxed sources.

use thiserror::Error;

/// Errors that can occur while talking to the OpenDota API.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// HTTP 404. Never retried.
    #[error("{resource} not found. {hint}")]
    NotFound { resource: String, hint: String },

    /// HTTP 429.
    #[error("rate limit exceeded for {resource}, please try again in a few minutes")]
    RateLimited { resource: String },

    /// HTTP 5xx.
    #[error("OpenDota is unavailable for {resource}: HTTP {status}")]
    ServiceUnavailable { resource: String, status: u16 },

    /// Any other non-2xx status.
    #[error("API error for {resource}: {status} - {reason}")]
    Http {
        resource: String,
        status: u16,
        reason: String,
    },

    /// Connection, TLS, timeout or body-read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The body was not the JSON we expected.
    #[error("failed to parse response from {resource}: {message}")]
    Parse { resource: String, message: String },

    /// Client construction or URL errors.
    #[error("config error: {0}")]
    Config(String),

    /// No data available (e.g., mock not configured).
    #[error("no data: {0}")]
    NoData(String),
}

impl IngestionError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            IngestionError::NotFound { .. } | IngestionError::Config(_) | IngestionError::NoData(_)
        )
    }

    /// Returns true for HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IngestionError::NotFound { .. })
    }

    /// Transient upstream conditions the caller should present as
    /// "try again later".
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            IngestionError::RateLimited { .. }
                | IngestionError::ServiceUnavailable { .. }
                | IngestionError::Network(_)
        )
    }
}

// Convert from reqwest::Error (direct API calls) to our error type.
impl From<reqwest::Error> for IngestionError {
    #[inline]
    fn from(err: reqwest::Error) -> Self {
        IngestionError::Network(err.to_string())
    }
}

impl From<url::ParseError> for IngestionError {
    #[inline]
    fn from(err: url::ParseError) -> Self {
        IngestionError::Config(format!("invalid URL: {}", err))
    }
}
