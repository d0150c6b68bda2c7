//! # od-ingestion
//!
//! Data ingestion layer for the OpenDota API.
//!
//! This crate provides a [`DataSource`] trait over the handful of OpenDota
//! routes the wrapped aggregate needs, a resilient HTTP client behind it,
//! and a mock for tests.
//!
//! ## Design Principles
//!
//! - **Zero-cost async**: Uses native async traits (Rust 1.75+), avoiding
//!   the heap allocations that `async_trait` would require.
//!
//! - **Explicit client**: An [`OpenDotaSource`] is constructed once and
//!   passed to whoever needs it. There is no global client.
//!
//! - **Typed failures**: [`IngestionError`] separates not-found, rate
//!   limiting, upstream outages, transport and parse failures so callers
//!   can decide what is fatal.
//!
//! - **Testable**: The [`MockSource`] implementation allows testing without
//!   network calls and records every call it receives.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use od_ingestion::{DataSource, OpenDotaSource};
//! use od_types::AccountId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = OpenDotaSource::from_env()?;
//!     let account = AccountId::resolve("76561198071885769")?;
//!
//!     let matches = source.get_matches(account, 20, 0).await?;
//!     println!("Fetched {} matches", matches.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Testing with MockSource
//!
//! ```rust
//! use od_ingestion::{DataSource, Endpoint, MockFailure, MockSource};
//! use od_types::AccountId;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockSource::new().with_failure(Endpoint::Heroes, MockFailure::ServiceUnavailable);
//!
//!     let heroes = mock.get_heroes(AccountId::new(1)).await;
//!     assert!(heroes.is_err());
//!     assert_eq!(mock.call_count(), 1);
//! }
//! ```
//!
//! ## Rate Limiting
//!
//! Each [`ApiClient`] pauses briefly after every successful response and
//! caps the number of requests in flight. Both limits are per client, so
//! two separately constructed sources do not share a budget.

mod api_client;
pub mod config;
mod endpoint;
pub mod error;
mod mock;
mod opendota;

pub use api_client::{classify_status, with_retry, ApiClient};
pub use config::{ClientConfig, RetryPolicy};
pub use endpoint::Endpoint;
pub use error::IngestionError;
pub use mock::{MockCall, MockFailure, MockSource};
pub use opendota::OpenDotaSource;

use od_types::{
    AccountId, HeroStat, MatchSummary, Peer, Player, ProPlayer, TopPlayer, TotalsEntry, WinLoss,
};
use std::future::Future;

/// Data source abstraction for OpenDota data.
///
/// It uses native async syntax (Rust 1.75+) rather than `async_trait`
/// to avoid heap allocations from `Box<dyn Future>`.
///
/// ## Implementors
///
/// - [`OpenDotaSource`]: Production implementation over HTTP
/// - [`MockSource`]: Test implementation with configurable responses
///
/// ## Why `Send + Sync`?
///
/// Sources are shared across async tasks (e.g., stored in `Arc` and used
/// from multiple handlers), and one aggregate build drives several calls
/// concurrently through the same source.
pub trait DataSource: Send + Sync {
    /// Fetch the profile and rank fields (`players/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::NotFound`] for unknown accounts.
    fn get_player(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<Player, IngestionError>> + Send;

    /// Fetch win/loss counts (`players/{id}/wl`).
    fn get_win_loss(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<WinLoss, IngestionError>> + Send;

    /// Fetch up to `limit` matches, newest first, skipping the `offset`
    /// most recent ones (`players/{id}/matches`).
    ///
    /// An offset past the end of the history yields an empty page.
    fn get_matches(
        &self,
        account: AccountId,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Vec<MatchSummary>, IngestionError>> + Send;

    /// Fetch the small fixed recent-match list (`players/{id}/recentMatches`).
    fn get_recent_matches(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<Vec<MatchSummary>, IngestionError>> + Send;

    /// Fetch per-hero statistics (`players/{id}/heroes`).
    fn get_heroes(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<Vec<HeroStat>, IngestionError>> + Send;

    /// Fetch peers (`players/{id}/peers`).
    fn get_peers(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<Vec<Peer>, IngestionError>> + Send;

    /// Fetch lifetime totals (`players/{id}/totals`).
    fn get_totals(
        &self,
        account: AccountId,
    ) -> impl Future<Output = Result<Vec<TotalsEntry>, IngestionError>> + Send;

    /// Fetch the global top players leaderboard.
    fn get_top_players(
        &self,
    ) -> impl Future<Output = Result<Vec<TopPlayer>, IngestionError>> + Send;

    /// Fetch the list of professional players.
    fn get_pro_players(
        &self,
    ) -> impl Future<Output = Result<Vec<ProPlayer>, IngestionError>> + Send;
}
