//! Core indexer implementation.
//!
//! The `Indexer` struct is the main entry point for turning a raw player
//! identifier into a [`WrappedAggregate`].

use crate::error::IndexerError;
use crate::oldest_match::{find_oldest_match, FinderConfig};
use crate::scope::RequestScope;
use od_ingestion::{ClientConfig, DataSource, IngestionError, OpenDotaSource};
use od_types::{
    oldest_match, top_friends, AccountId, Player, ProPlayer, RecordsSummary, Section, TopPlayer,
    WrappedAggregate, DEFAULT_FRIEND_MIN_GAMES, DEFAULT_TOP_FRIENDS,
};
use std::sync::Arc;
use std::time::Duration;

/// Matches fetched for record derivation.
pub const DEFAULT_MATCH_SAMPLE: u32 = 100;

/// Configuration for the indexer.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Upstream client settings.
    pub client: ClientConfig,

    /// Oldest-match search tuning.
    pub finder: FinderConfig,

    /// Size of the match sample used for records.
    pub match_sample: u32,

    /// Minimum games together for a peer to count as a friend.
    pub friend_min_games: u32,

    /// Number of friends kept.
    pub top_friends: usize,

    /// Overall budget for one aggregate build. `None` means unbounded.
    pub deadline: Option<Duration>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            finder: FinderConfig::default(),
            match_sample: DEFAULT_MATCH_SAMPLE,
            friend_min_games: DEFAULT_FRIEND_MIN_GAMES,
            top_friends: DEFAULT_TOP_FRIENDS,
            deadline: None,
        }
    }
}

impl IndexerConfig {
    /// Default settings with the client configured from the environment.
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            ..Self::default()
        }
    }

    /// Set the client configuration.
    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    /// Set the oldest-match search tuning.
    pub fn with_finder(mut self, finder: FinderConfig) -> Self {
        self.finder = finder;
        self
    }

    /// Set the match sample size.
    pub fn with_match_sample(mut self, limit: u32) -> Self {
        self.match_sample = limit;
        self
    }

    /// Set the friend policy.
    pub fn with_friends(mut self, min_games: u32, limit: usize) -> Self {
        self.friend_min_games = min_games;
        self.top_friends = limit;
        self
    }

    /// Bound every aggregate build by `deadline`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use od_indexer::IndexerConfig;
    /// use std::time::Duration;
    ///
    /// let config = IndexerConfig::default().with_deadline(Duration::from_secs(30));
    /// assert_eq!(config.deadline, Some(Duration::from_secs(30)));
    /// ```
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Builds wrapped aggregates from a [`DataSource`].
///
/// The source is shared, so clones of an `Indexer` share one client and
/// one in-flight budget. Nothing is cached between builds.
///
/// # Example
///
/// ```rust,no_run
/// use od_indexer::{Indexer, IndexerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let indexer = Indexer::new(IndexerConfig::from_env())?;
///
///     let wrapped = indexer.build_wrapped("76561198071885769").await?;
///     println!(
///         "{} matches, {:.1}% won",
///         wrapped.total_matches,
///         wrapped.win_rate()
///     );
///     Ok(())
/// }
/// ```
pub struct Indexer<S = OpenDotaSource> {
    /// The data source for fetching from OpenDota.
    source: Arc<S>,

    /// Configuration.
    config: IndexerConfig,
}

impl<S> Clone for Indexer<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

impl Indexer<OpenDotaSource> {
    /// Create an indexer over the OpenDota API.
    pub fn new(config: IndexerConfig) -> Result<Self, IndexerError> {
        let source = OpenDotaSource::new(config.client.clone())?;
        Ok(Self::with_source(source, config))
    }

    /// Create an indexer configured from the environment.
    pub fn from_env() -> Result<Self, IndexerError> {
        Self::new(IndexerConfig::from_env())
    }
}

impl<S: DataSource> Indexer<S> {
    /// Create an indexer over an arbitrary source.
    pub fn with_source(source: S, config: IndexerConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    /// Get the underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the configuration.
    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Check whether a raw identifier names an existing account.
    ///
    /// This is a single upstream call and never runs the full fan-out.
    ///
    /// # Errors
    ///
    /// Malformed identifiers and transient upstream failures are errors;
    /// an unknown account is `Ok(false)`.
    pub async fn validate_account(&self, raw: &str) -> Result<bool, IndexerError> {
        let account = AccountId::resolve(raw)?;

        match self.source.get_player(account).await {
            Ok(player) => Ok(player.exists()),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Build the wrapped aggregate for a raw identifier.
    ///
    /// # Steps
    ///
    /// 1. Normalize the identifier.
    /// 2. Probe the profile; stop with [`IndexerError::AccountNotFound`] if
    ///    the account does not exist.
    /// 3. Fetch everything else concurrently. Profile and win/loss are
    ///    required and abort the build on failure. The other sections fall
    ///    back to empty and are listed in [`WrappedAggregate::degraded`].
    /// 4. Derive records, top friends and the first match.
    ///
    /// Dropping the returned future cancels every request still in flight.
    pub async fn build_wrapped(&self, raw: &str) -> Result<WrappedAggregate, IndexerError> {
        let account = AccountId::resolve(raw)?;

        match self.config.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.build_for(account))
                .await
                .map_err(|_| {
                    tracing::warn!("Wrapped build for {} exceeded {:?}", account, deadline);
                    IndexerError::DeadlineExceeded(deadline)
                })?,
            None => self.build_for(account).await,
        }
    }

    /// Fetch the global top players leaderboard.
    pub async fn top_players(&self) -> Result<Vec<TopPlayer>, IndexerError> {
        Ok(self.source.get_top_players().await?)
    }

    /// Fetch the list of professional players.
    pub async fn pro_players(&self) -> Result<Vec<ProPlayer>, IndexerError> {
        Ok(self.source.get_pro_players().await?)
    }

    async fn build_for(&self, account: AccountId) -> Result<WrappedAggregate, IndexerError> {
        let scope = RequestScope::new(self.source.as_ref());

        require_existing(&scope, account).await?;

        let required = async {
            futures::try_join!(scope.get_player(account), scope.get_win_loss(account))
        };
        let optional = async {
            Ok::<_, IngestionError>(futures::join!(
                scope.get_recent_matches(account),
                scope.get_heroes(account),
                scope.get_peers(account),
                scope.get_totals(account),
                scope.get_matches(account, self.config.match_sample, 0),
                find_oldest_match(&scope, account, &self.config.finder),
            ))
        };

        let ((player, win_loss), (recent, heroes, peers, totals, sample, found_first)) =
            futures::try_join!(required, optional)?;

        let mut degraded = Vec::new();
        let recent_matches = or_degraded(recent, Section::RecentMatches, account, &mut degraded);
        let heroes = or_degraded(heroes, Section::Heroes, account, &mut degraded);
        let mut peers = or_degraded(peers, Section::Peers, account, &mut degraded);
        let totals = or_degraded(totals, Section::Totals, account, &mut degraded);
        let sample = or_degraded(sample, Section::MatchSample, account, &mut degraded);

        peers.sort_by(|a, b| b.games.cmp(&a.games));
        let friends = top_friends(&peers, self.config.friend_min_games, self.config.top_friends);

        let records = RecordsSummary::derive(&sample, &totals);

        let first_match = found_first.or_else(|| oldest_match(&sample).cloned());
        let total_matches = win_loss.total();
        if first_match.is_none() && total_matches > 0 {
            degraded.push(Section::FirstMatch);
        }

        tracing::info!(
            "Built wrapped aggregate for {}: {} matches, {} degraded sections",
            account,
            total_matches,
            degraded.len()
        );

        Ok(WrappedAggregate {
            account_id: account,
            rank: player.rank(),
            player,
            win_loss,
            total_matches,
            recent_matches,
            first_match,
            heroes,
            peers,
            top_friends: friends,
            records,
            totals,
            degraded,
        })
    }
}

/// Existence probe ahead of the fan-out.
async fn require_existing<S: DataSource>(
    source: &S,
    account: AccountId,
) -> Result<Player, IndexerError> {
    let player = source
        .get_player(account)
        .await
        .map_err(|err| IndexerError::from_lookup(account, err))?;

    if !player.exists() {
        return Err(IndexerError::AccountNotFound {
            account_id: account,
            hint: format!(
                "OpenDota has no public profile for this account. \
                 Check https://www.opendota.com/players/{} or try a known account such as 111620041.",
                account
            ),
        });
    }

    Ok(player)
}

fn or_degraded<T: Default>(
    result: Result<T, IngestionError>,
    section: Section,
    account: AccountId,
    degraded: &mut Vec<Section>,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                "Section {} for {} unavailable: {}",
                section.as_str(),
                account,
                err
            );
            degraded.push(section);
            T::default()
        }
    }
}
