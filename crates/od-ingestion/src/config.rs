//! Configuration for the ingestion layer.
//!
//! # Environment Variables
//!
//! - `OPENDOTA_BASE_URL`: API root (default: `https://api.opendota.com/api/`)
//! - `OPENDOTA_API_KEY`: optional key, sent as the `api_key` query parameter
//! - `OPENDOTA_MAX_ATTEMPTS`: attempts per request (default: 3)
//! - `OPENDOTA_MAX_IN_FLIGHT`: concurrent requests per client (default: 4)
//! - `OPENDOTA_TIMEOUT_SECS`: per-request transport timeout (default: 15)
//!
//! Unset or unparseable values fall back to the defaults.

use std::env;
use std::time::Duration;

/// Public OpenDota API root.
pub const DEFAULT_BASE_URL: &str = "https://api.opendota.com/api/";

/// Attempts per request, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base of the linear retry backoff.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Pause after every successful response.
pub const DEFAULT_SUCCESS_DELAY: Duration = Duration::from_millis(50);

/// Per-request transport timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Requests allowed in flight at once, per client.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Retry schedule for a single request.
///
/// After a retryable failure on attempt `n` (1-based) the client waits
/// `base_delay * n` before attempt `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Linear backoff step.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt `attempt` (1-based).
    #[inline]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Attempt budget, at least one.
    #[inline]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root. A trailing slash is added if missing.
    pub base_url: String,
    /// Optional API key.
    pub api_key: Option<String>,
    /// Retry schedule.
    pub retry: RetryPolicy,
    /// Pause after every successful response.
    pub success_delay: Duration,
    /// Transport timeout per attempt.
    pub request_timeout: Duration,
    /// Requests allowed in flight at once across all callers of a client.
    pub max_in_flight: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            retry: RetryPolicy::default(),
            success_delay: DEFAULT_SUCCESS_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            base_url: lookup("OPENDOTA_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            api_key: lookup("OPENDOTA_API_KEY").filter(|v| !v.trim().is_empty()),
            retry: RetryPolicy {
                max_attempts: parsed("OPENDOTA_MAX_ATTEMPTS")
                    .and_then(|v| u32::try_from(v).ok())
                    .filter(|v| *v > 0)
                    .unwrap_or(defaults.retry.max_attempts),
                base_delay: defaults.retry.base_delay,
            },
            success_delay: defaults.success_delay,
            request_timeout: parsed("OPENDOTA_TIMEOUT_SECS")
                .filter(|v| *v > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_in_flight: parsed("OPENDOTA_MAX_IN_FLIGHT")
                .and_then(|v| usize::try_from(v).ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.max_in_flight),
        }
    }

    /// Set the API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the retry schedule.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the pause after successful responses.
    pub fn with_success_delay(mut self, delay: Duration) -> Self {
        self.success_delay = delay;
        self
    }

    /// Set the in-flight request limit.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Base URL with the trailing slash `Url::join` needs.
    pub(crate) fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay, Duration::from_millis(1000));
        assert_eq!(config.success_delay, Duration::from_millis(50));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        assert_eq!(ClientConfig::from_lookup(|_| None), ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("OPENDOTA_BASE_URL", "http://localhost:9000/api"),
            ("OPENDOTA_API_KEY", "secret"),
            ("OPENDOTA_MAX_ATTEMPTS", "5"),
            ("OPENDOTA_MAX_IN_FLIGHT", "2"),
            ("OPENDOTA_TIMEOUT_SECS", "3"),
        ]));

        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.max_in_flight, 2);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_from_lookup_bad_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("OPENDOTA_MAX_ATTEMPTS", "many"),
            ("OPENDOTA_MAX_IN_FLIGHT", "0"),
            ("OPENDOTA_API_KEY", "  "),
        ]));
        assert_eq!(config.retry.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.max_in_flight, DEFAULT_MAX_IN_FLIGHT);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_retry_delay_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let policy = RetryPolicy {
            max_attempts: 0,
            base_delay: Duration::ZERO,
        };
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn test_normalized_base_url() {
        let config = ClientConfig::default().with_base_url("http://x/api");
        assert_eq!(config.normalized_base_url(), "http://x/api/");
        assert_eq!(
            ClientConfig::default().normalized_base_url(),
            DEFAULT_BASE_URL
        );
    }
}
