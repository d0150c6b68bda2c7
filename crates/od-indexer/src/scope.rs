//! Request-scoped response cache.
//!
//! A [`RequestScope`] lives for exactly one aggregate build. It wraps the
//! real source and memoizes successful responses by endpoint, account and
//! page, so the existence probe and the later profile fetch cost a single
//! upstream call. Errors are never cached.
//!
//! Two concurrent misses for the same key both go upstream; the builder
//! never issues those in parallel.

use od_ingestion::{DataSource, Endpoint, IngestionError};
use od_types::{
    AccountId, HeroStat, MatchSummary, Peer, Player, ProPlayer, TopPlayer, TotalsEntry, WinLoss,
};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    endpoint: Endpoint,
    account: Option<AccountId>,
    page: Option<(u32, u32)>,
}

impl CacheKey {
    fn new(endpoint: Endpoint, account: Option<AccountId>) -> Self {
        Self {
            endpoint,
            account,
            page: None,
        }
    }

    fn page(account: AccountId, limit: u32, offset: u32) -> Self {
        Self {
            endpoint: Endpoint::Matches,
            account: Some(account),
            page: Some((limit, offset)),
        }
    }
}

/// Memoizing [`DataSource`] wrapper for one aggregate build.
pub struct RequestScope<'a, S> {
    source: &'a S,
    entries: Mutex<HashMap<CacheKey, Box<dyn Any + Send + Sync>>>,
}

impl<'a, S: DataSource> RequestScope<'a, S> {
    /// Start an empty scope over `source`.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached responses.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup<T: Clone + 'static>(&self, key: &CacheKey) -> Option<T> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }

    fn store<T: Send + Sync + 'static>(&self, key: CacheKey, value: T) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Box::new(value));
    }

    async fn cached<T, F, Fut>(&self, key: CacheKey, fetch: F) -> Result<T, IngestionError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, IngestionError>>,
    {
        if let Some(hit) = self.lookup::<T>(&key) {
            tracing::trace!("cache hit for {}", key.endpoint);
            return Ok(hit);
        }

        let value = fetch().await?;
        self.store(key, value.clone());
        Ok(value)
    }
}

impl<S: DataSource> DataSource for RequestScope<'_, S> {
    async fn get_player(&self, account: AccountId) -> Result<Player, IngestionError> {
        self.cached(CacheKey::new(Endpoint::Player, Some(account)), || {
            self.source.get_player(account)
        })
        .await
    }

    async fn get_win_loss(&self, account: AccountId) -> Result<WinLoss, IngestionError> {
        self.cached(CacheKey::new(Endpoint::WinLoss, Some(account)), || {
            self.source.get_win_loss(account)
        })
        .await
    }

    async fn get_matches(
        &self,
        account: AccountId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<MatchSummary>, IngestionError> {
        self.cached(CacheKey::page(account, limit, offset), || {
            self.source.get_matches(account, limit, offset)
        })
        .await
    }

    async fn get_recent_matches(
        &self,
        account: AccountId,
    ) -> Result<Vec<MatchSummary>, IngestionError> {
        self.cached(CacheKey::new(Endpoint::RecentMatches, Some(account)), || {
            self.source.get_recent_matches(account)
        })
        .await
    }

    async fn get_heroes(&self, account: AccountId) -> Result<Vec<HeroStat>, IngestionError> {
        self.cached(CacheKey::new(Endpoint::Heroes, Some(account)), || {
            self.source.get_heroes(account)
        })
        .await
    }

    async fn get_peers(&self, account: AccountId) -> Result<Vec<Peer>, IngestionError> {
        self.cached(CacheKey::new(Endpoint::Peers, Some(account)), || {
            self.source.get_peers(account)
        })
        .await
    }

    async fn get_totals(&self, account: AccountId) -> Result<Vec<TotalsEntry>, IngestionError> {
        self.cached(CacheKey::new(Endpoint::Totals, Some(account)), || {
            self.source.get_totals(account)
        })
        .await
    }

    async fn get_top_players(&self) -> Result<Vec<TopPlayer>, IngestionError> {
        self.cached(CacheKey::new(Endpoint::TopPlayers, None), || {
            self.source.get_top_players()
        })
        .await
    }

    async fn get_pro_players(&self) -> Result<Vec<ProPlayer>, IngestionError> {
        self.cached(CacheKey::new(Endpoint::ProPlayers, None), || {
            self.source.get_pro_players()
        })
        .await
    }
}
