//! OpenDota data source.
//!
//! [`OpenDotaSource`] implements [`DataSource`] on top of [`ApiClient`].
//! It holds no state besides the client; caching belongs to the indexer's
//! per-request scope.

use crate::{
    api_client::ApiClient, config::ClientConfig, endpoint::Endpoint, error::IngestionError,
    DataSource,
};
use od_types::{
    AccountId, HeroStat, MatchSummary, Peer, Player, ProPlayer, TopPlayer, TotalsEntry, WinLoss,
};

/// Production data source backed by the OpenDota REST API.
///
/// # Example
///
/// ```rust,no_run
/// use od_ingestion::{DataSource, OpenDotaSource};
/// use od_types::AccountId;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = OpenDotaSource::public()?;
///     let wl = source.get_win_loss(AccountId::new(111620041)).await?;
///     println!("{} wins / {} losses", wl.win, wl.lose);
///     Ok(())
/// }
/// ```
pub struct OpenDotaSource {
    client: ApiClient,
}

impl OpenDotaSource {
    /// Create a source with the given client configuration.
    pub fn new(config: ClientConfig) -> Result<Self, IngestionError> {
        Ok(Self {
            client: ApiClient::new(config)?,
        })
    }

    /// Create a source for the public API with default settings.
    #[inline]
    pub fn public() -> Result<Self, IngestionError> {
        Self::new(ClientConfig::default())
    }

    /// Create a source configured from the environment.
    #[inline]
    pub fn from_env() -> Result<Self, IngestionError> {
        Self::new(ClientConfig::from_env())
    }

    /// Get the underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn fetch_player_scoped<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        account: AccountId,
    ) -> Result<T, IngestionError> {
        self.client
            .fetch_json(&endpoint.path(Some(account)), &[])
            .await
    }
}

impl DataSource for OpenDotaSource {
    async fn get_player(&self, account: AccountId) -> Result<Player, IngestionError> {
        self.fetch_player_scoped(Endpoint::Player, account).await
    }

    async fn get_win_loss(&self, account: AccountId) -> Result<WinLoss, IngestionError> {
        self.fetch_player_scoped(Endpoint::WinLoss, account).await
    }

    /// Pages are newest-first; `offset` skips that many recent matches.
    async fn get_matches(
        &self,
        account: AccountId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<MatchSummary>, IngestionError> {
        let mut query = vec![("limit", limit.to_string())];
        if offset > 0 {
            query.push(("offset", offset.to_string()));
        }
        self.client
            .fetch_json(&Endpoint::Matches.path(Some(account)), &query)
            .await
    }

    async fn get_recent_matches(
        &self,
        account: AccountId,
    ) -> Result<Vec<MatchSummary>, IngestionError> {
        self.fetch_player_scoped(Endpoint::RecentMatches, account)
            .await
    }

    async fn get_heroes(&self, account: AccountId) -> Result<Vec<HeroStat>, IngestionError> {
        self.fetch_player_scoped(Endpoint::Heroes, account).await
    }

    async fn get_peers(&self, account: AccountId) -> Result<Vec<Peer>, IngestionError> {
        self.fetch_player_scoped(Endpoint::Peers, account).await
    }

    async fn get_totals(&self, account: AccountId) -> Result<Vec<TotalsEntry>, IngestionError> {
        self.fetch_player_scoped(Endpoint::Totals, account).await
    }

    async fn get_top_players(&self) -> Result<Vec<TopPlayer>, IngestionError> {
        self.client
            .fetch_json(&Endpoint::TopPlayers.path(None), &[])
            .await
    }

    async fn get_pro_players(&self) -> Result<Vec<ProPlayer>, IngestionError> {
        self.client
            .fetch_json(&Endpoint::ProPlayers.path(None), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_source() {
        let source = OpenDotaSource::public().unwrap();
        assert_eq!(
            source.client().config().base_url,
            crate::config::DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_bad_config_rejected() {
        let result = OpenDotaSource::new(ClientConfig::default().with_base_url("::"));
        assert!(result.is_err());
    }
}
