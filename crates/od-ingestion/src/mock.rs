//! Mock data source for testing.
//!
//! `MockSource` implements `DataSource` with configurable responses,
//! allowing tests to run without network calls. Every call is recorded so
//! tests can assert how many requests a code path made.
//!
//! # Usage
//!
//! ```rust
//! use od_ingestion::{DataSource, Endpoint, MockSource};
//! use od_types::{AccountId, MatchSummary, WinLoss};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockSource::new()
//!     .with_win_loss(WinLoss { win: 10, lose: 5 })
//!     .with_matches(vec![MatchSummary { match_id: 1, ..Default::default() }]);
//!
//! let page = mock.get_matches(AccountId::new(1), 100, 0).await.unwrap();
//! assert_eq!(page.len(), 1);
//! assert_eq!(mock.calls_to(Endpoint::Matches), 1);
//! # }
//! ```

use crate::{endpoint::Endpoint, error::IngestionError, DataSource};
use od_types::{
    AccountId, HeroStat, MatchSummary, Peer, Player, ProPlayer, TopPlayer, TotalsEntry, WinLoss,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Failure a mock endpoint should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    NotFound,
    RateLimited,
    ServiceUnavailable,
    Network,
}

impl MockFailure {
    /// The error a real client would return for this failure.
    pub fn to_error(self, resource: &str) -> IngestionError {
        let resource = resource.to_string();
        match self {
            MockFailure::NotFound => IngestionError::NotFound {
                hint: "mock account does not exist".to_string(),
                resource,
            },
            MockFailure::RateLimited => IngestionError::RateLimited { resource },
            MockFailure::ServiceUnavailable => IngestionError::ServiceUnavailable {
                resource,
                status: 503,
            },
            MockFailure::Network => IngestionError::Network(format!("mock network failure for {}", resource)),
        }
    }
}

/// One recorded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockCall {
    pub endpoint: Endpoint,
    pub account_id: Option<AccountId>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Mock data source for testing.
///
/// Stores test data that will be returned by `DataSource` methods.
/// Uses builder pattern for convenient setup.
///
/// # Note on Cloning
///
/// This mock clones data when returning it. For testing purposes
/// this overhead is negligible. Clones of a `MockSource` share one call log.
#[derive(Default, Clone)]
pub struct MockSource {
    /// Player to return. If None, `get_player` answers not found.
    pub player: Option<Player>,

    /// Win/loss to return. If None, returns an error.
    pub win_loss: Option<WinLoss>,

    /// Full match history, newest first. Pages are sliced from it.
    pub matches: Vec<MatchSummary>,

    /// Explicit pages keyed by offset; these take precedence over `matches`.
    pub pages: HashMap<u32, Vec<MatchSummary>>,

    pub recent_matches: Vec<MatchSummary>,
    pub heroes: Vec<HeroStat>,
    pub peers: Vec<Peer>,
    pub totals: Vec<TotalsEntry>,
    pub top_players: Vec<TopPlayer>,
    pub pro_players: Vec<ProPlayer>,

    /// Endpoints that fail on every call.
    pub failures: HashMap<Endpoint, MockFailure>,

    /// Match pages that fail at a given offset.
    pub offset_failures: HashMap<u32, MockFailure>,

    /// Artificial latency added to every call.
    pub latency: Duration,

    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the player to return (builder pattern).
    pub fn with_player(mut self, player: Player) -> Self {
        self.player = Some(player);
        self
    }

    /// Set the win/loss counts to return (builder pattern).
    pub fn with_win_loss(mut self, win_loss: WinLoss) -> Self {
        self.win_loss = Some(win_loss);
        self
    }

    /// Set the full match history, newest first (builder pattern).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mock = MockSource::new().with_matches(vec![newest, older, oldest]);
    /// ```
    pub fn with_matches(mut self, matches: Vec<MatchSummary>) -> Self {
        self.matches = matches;
        self
    }

    /// Serve `page` for requests at `offset`, regardless of `matches`.
    pub fn with_page(mut self, offset: u32, page: Vec<MatchSummary>) -> Self {
        self.pages.insert(offset, page);
        self
    }

    pub fn with_recent_matches(mut self, matches: Vec<MatchSummary>) -> Self {
        self.recent_matches = matches;
        self
    }

    pub fn with_heroes(mut self, heroes: Vec<HeroStat>) -> Self {
        self.heroes = heroes;
        self
    }

    pub fn with_peers(mut self, peers: Vec<Peer>) -> Self {
        self.peers = peers;
        self
    }

    pub fn with_totals(mut self, totals: Vec<TotalsEntry>) -> Self {
        self.totals = totals;
        self
    }

    pub fn with_top_players(mut self, players: Vec<TopPlayer>) -> Self {
        self.top_players = players;
        self
    }

    pub fn with_pro_players(mut self, players: Vec<ProPlayer>) -> Self {
        self.pro_players = players;
        self
    }

    /// Make every call to `endpoint` fail (builder pattern).
    pub fn with_failure(mut self, endpoint: Endpoint, failure: MockFailure) -> Self {
        self.failures.insert(endpoint, failure);
        self
    }

    /// Make the match page at `offset` fail (builder pattern).
    pub fn with_offset_failure(mut self, offset: u32, failure: MockFailure) -> Self {
        self.offset_failures.insert(offset, failure);
        self
    }

    /// Delay every call by `latency` (builder pattern).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Total number of calls received.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of calls received for one endpoint.
    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    /// Record a call, wait out the latency and apply endpoint failures.
    async fn enter(
        &self,
        endpoint: Endpoint,
        account: Option<AccountId>,
        page: Option<(u32, u32)>,
    ) -> Result<(), IngestionError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockCall {
                endpoint,
                account_id: account,
                limit: page.map(|(limit, _)| limit),
                offset: page.map(|(_, offset)| offset),
            });

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.failures.get(&endpoint) {
            Some(failure) => Err(failure.to_error(&endpoint.path(account))),
            None => Ok(()),
        }
    }
}

impl DataSource for MockSource {
    async fn get_player(&self, account: AccountId) -> Result<Player, IngestionError> {
        self.enter(Endpoint::Player, Some(account), None).await?;
        self.player
            .clone()
            .ok_or_else(|| MockFailure::NotFound.to_error(&Endpoint::Player.path(Some(account))))
    }

    async fn get_win_loss(&self, account: AccountId) -> Result<WinLoss, IngestionError> {
        self.enter(Endpoint::WinLoss, Some(account), None).await?;
        self.win_loss
            .ok_or_else(|| IngestionError::NoData("mock win/loss not configured".into()))
    }

    async fn get_matches(
        &self,
        account: AccountId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<MatchSummary>, IngestionError> {
        self.enter(Endpoint::Matches, Some(account), Some((limit, offset)))
            .await?;

        if let Some(failure) = self.offset_failures.get(&offset) {
            return Err(failure.to_error(&Endpoint::Matches.path(Some(account))));
        }

        if let Some(page) = self.pages.get(&offset) {
            return Ok(page.iter().take(limit as usize).cloned().collect());
        }

        // Slice the history the way the real API pages it.
        Ok(self
            .matches
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_recent_matches(
        &self,
        account: AccountId,
    ) -> Result<Vec<MatchSummary>, IngestionError> {
        self.enter(Endpoint::RecentMatches, Some(account), None)
            .await?;
        Ok(self.recent_matches.clone())
    }

    async fn get_heroes(&self, account: AccountId) -> Result<Vec<HeroStat>, IngestionError> {
        self.enter(Endpoint::Heroes, Some(account), None).await?;
        Ok(self.heroes.clone())
    }

    async fn get_peers(&self, account: AccountId) -> Result<Vec<Peer>, IngestionError> {
        self.enter(Endpoint::Peers, Some(account), None).await?;
        Ok(self.peers.clone())
    }

    async fn get_totals(&self, account: AccountId) -> Result<Vec<TotalsEntry>, IngestionError> {
        self.enter(Endpoint::Totals, Some(account), None).await?;
        Ok(self.totals.clone())
    }

    async fn get_top_players(&self) -> Result<Vec<TopPlayer>, IngestionError> {
        self.enter(Endpoint::TopPlayers, None, None).await?;
        Ok(self.top_players.clone())
    }

    async fn get_pro_players(&self) -> Result<Vec<ProPlayer>, IngestionError> {
        self.enter(Endpoint::ProPlayers, None, None).await?;
        Ok(self.pro_players.clone())
    }
}
