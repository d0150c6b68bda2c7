//! Resilient HTTP client for the OpenDota REST API.
//!
//! # Behavior
//!
//! Every request goes through [`ApiClient::fetch_json`]:
//! 1. Wait for a slot in the client-wide in-flight limiter.
//! 2. `GET` the URL and classify the status (see [`classify_status`]).
//! 3. On success, parse the JSON body and pause for the configured
//!    success delay while still holding the slot.
//! 4. On a retryable failure, wait `base_delay * attempt` and try again,
//!    up to the attempt budget. 404 is returned immediately.
//!
//! The limiter belongs to the client, so a parallel fan-out through one
//! client shares a single budget instead of pacing each call on its own.

use crate::config::{ClientConfig, RetryPolicy};
use crate::error::IngestionError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Public profile page used in not-found hints.
const PROFILE_PAGE_URL: &str = "https://www.opendota.com/players";

/// Client for OpenDota endpoints.
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
    in_flight: Arc<Semaphore>,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::Config`] if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, IngestionError> {
        let base_url = Url::parse(&config.normalized_base_url())?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("od-ingestion/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IngestionError::Config(format!("failed to build HTTP client: {}", e)))?;

        let in_flight = Arc::new(Semaphore::new(config.max_in_flight.max(1)));

        Ok(Self {
            http_client,
            base_url,
            config,
            in_flight,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the full URL for a path and query.
    ///
    /// The API key, when configured, is appended as `api_key`.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, IngestionError> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;

        let api_key = self.config.api_key.as_deref();
        if !query.is_empty() || api_key.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some(key) = api_key {
                pairs.append_pair("api_key", key);
            }
        }

        Ok(url)
    }

    /// Fetch and deserialize a JSON resource with retries.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the API root, e.g. `players/123/wl`
    /// * `query` - Query parameters
    ///
    /// # Errors
    ///
    /// The error of the last attempt, or [`IngestionError::NotFound`] as
    /// soon as the API answers 404.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, IngestionError> {
        let url = self.url(path, query)?;
        let url = &url;

        with_retry(&self.config.retry, path, move |_attempt| {
            self.fetch_once(url, path)
        })
        .await
    }

    /// A single attempt.
    async fn fetch_once<T: DeserializeOwned>(
        &self,
        url: &Url,
        resource: &str,
    ) -> Result<T, IngestionError> {
        let _permit = self
            .in_flight
            .acquire()
            .await
            .map_err(|_| IngestionError::Config("request limiter closed".to_string()))?;

        tracing::debug!("GET {}", resource);
        let response = self.http_client.get(url.clone()).send().await?;

        if let Some(err) = classify_status(response.status(), resource) {
            return Err(err);
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body).map_err(|e| IngestionError::Parse {
            resource: resource.to_string(),
            message: e.to_string(),
        })?;

        // Spacing between calls; the permit is still held.
        tokio::time::sleep(self.config.success_delay).await;

        Ok(value)
    }
}

/// Map a non-success status to its error, `None` for 2xx.
pub fn classify_status(status: StatusCode, resource: &str) -> Option<IngestionError> {
    if status.is_success() {
        return None;
    }

    let resource_owned = resource.to_string();
    let err = match status {
        StatusCode::NOT_FOUND => IngestionError::NotFound {
            hint: not_found_hint(resource),
            resource: resource_owned,
        },
        StatusCode::TOO_MANY_REQUESTS => IngestionError::RateLimited {
            resource: resource_owned,
        },
        s if s.is_server_error() => IngestionError::ServiceUnavailable {
            resource: resource_owned,
            status: s.as_u16(),
        },
        s => IngestionError::Http {
            resource: resource_owned,
            status: s.as_u16(),
            reason: s.canonical_reason().unwrap_or("Unknown").to_string(),
        },
    };
    Some(err)
}

/// Remediation hint for a 404 on `resource`.
fn not_found_hint(resource: &str) -> String {
    let account = resource
        .strip_prefix("players/")
        .and_then(|rest| rest.split('/').next())
        .filter(|id| !id.is_empty());

    match account {
        Some(id) => format!(
            "The account id may not exist in OpenDota's database, the player may never have \
             played Dota, or the profile may be private or untracked. \
             Check {}/{} to see if the profile exists.",
            PROFILE_PAGE_URL, id
        ),
        None => "The requested resource does not exist.".to_string(),
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is spent.
///
/// `op` receives the 1-based attempt number.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    resource: &str,
    mut op: F,
) -> Result<T, IngestionError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, IngestionError>>,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) if attempt >= attempts => {
                tracing::warn!(
                    "Giving up on {} after {} attempts: {}",
                    resource,
                    attempt,
                    err
                );
                return Err(err);
            }
            Err(err) => {
                let delay = policy.delay_after(attempt);
                tracing::debug!(
                    "Attempt {}/{} for {} failed ({}), retrying in {:?}",
                    attempt,
                    attempts,
                    resource,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::ZERO,
        }
    }

    fn client(config: ClientConfig) -> ApiClient {
        ApiClient::new(config).unwrap()
    }

    #[test]
    fn test_classify_success() {
        assert!(classify_status(StatusCode::OK, "players/1").is_none());
        assert!(classify_status(StatusCode::NO_CONTENT, "players/1").is_none());
    }

    #[test]
    fn test_classify_not_found_has_hint() {
        let err = classify_status(StatusCode::NOT_FOUND, "players/12345/wl").unwrap();
        match err {
            IngestionError::NotFound { resource, hint } => {
                assert_eq!(resource, "players/12345/wl");
                assert!(hint.contains("https://www.opendota.com/players/12345"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_rate_limited() {
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "players/1").unwrap();
        assert!(matches!(err, IngestionError::RateLimited { .. }));
    }

    #[test]
    fn test_classify_server_error() {
        let err = classify_status(StatusCode::BAD_GATEWAY, "players/1").unwrap();
        assert!(matches!(
            err,
            IngestionError::ServiceUnavailable { status: 502, .. }
        ));
    }

    #[test]
    fn test_classify_other_status() {
        let err = classify_status(StatusCode::BAD_REQUEST, "players/1").unwrap();
        match err {
            IngestionError::Http { status, reason, .. } => {
                assert_eq!(status, 400);
                assert_eq!(reason, "Bad Request");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_url_building() {
        let api = client(ClientConfig::default());
        let url = api
            .url(
                "players/1/matches",
                &[("limit", "100".to_string()), ("offset", "500".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.opendota.com/api/players/1/matches?limit=100&offset=500"
        );

        let url = api.url("players/1", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.opendota.com/api/players/1");
    }

    #[test]
    fn test_url_with_api_key_and_custom_base() {
        let api = client(
            ClientConfig::default()
                .with_base_url("http://localhost:8080/api")
                .with_api_key("k3y"),
        );
        let url = api.url("/topPlayers", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/topPlayers?api_key=k3y");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new(ClientConfig::default().with_base_url("not a url"));
        assert!(matches!(result, Err(IngestionError::Config(_))));
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(3), "players/1", |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(IngestionError::Network("reset".to_string()))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_exhausts_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&fast_policy(3), "players/1", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(IngestionError::RateLimited {
                    resource: "players/1".to_string(),
                })
            }
        })
        .await;

        assert!(matches!(result, Err(IngestionError::RateLimited { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_stops_on_not_found() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&fast_policy(3), "players/1", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(classify_status(StatusCode::NOT_FOUND, "players/1").unwrap()) }
        })
        .await;

        assert!(matches!(result, Err(IngestionError::NotFound { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_single_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&fast_policy(1), "players/1", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(IngestionError::Network("down".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
