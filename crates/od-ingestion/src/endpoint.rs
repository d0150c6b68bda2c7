//! Upstream routes used by the aggregator.

use od_types::AccountId;
use serde::Serialize;
use std::fmt;

/// An OpenDota route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// `players/{id}`: profile plus rank fields.
    Player,
    /// `players/{id}/wl`
    WinLoss,
    /// `players/{id}/matches?limit=N&offset=K`, newest first.
    Matches,
    /// `players/{id}/recentMatches`
    RecentMatches,
    /// `players/{id}/heroes`
    Heroes,
    /// `players/{id}/peers`
    Peers,
    /// `players/{id}/totals`
    Totals,
    /// `topPlayers`
    TopPlayers,
    /// `proPlayers`
    ProPlayers,
}

impl Endpoint {
    /// Returns true for routes that are not scoped to a player.
    pub fn is_global(&self) -> bool {
        matches!(self, Endpoint::TopPlayers | Endpoint::ProPlayers)
    }

    /// Path relative to the API root.
    ///
    /// `account` is ignored by global routes.
    pub fn path(&self, account: Option<AccountId>) -> String {
        let account = account.map(|a| a.to_string()).unwrap_or_default();
        match self {
            Endpoint::Player => format!("players/{}", account),
            Endpoint::WinLoss => format!("players/{}/wl", account),
            Endpoint::Matches => format!("players/{}/matches", account),
            Endpoint::RecentMatches => format!("players/{}/recentMatches", account),
            Endpoint::Heroes => format!("players/{}/heroes", account),
            Endpoint::Peers => format!("players/{}/peers", account),
            Endpoint::Totals => format!("players/{}/totals", account),
            Endpoint::TopPlayers => "topPlayers".to_string(),
            Endpoint::ProPlayers => "proPlayers".to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Player => "player",
            Endpoint::WinLoss => "win_loss",
            Endpoint::Matches => "matches",
            Endpoint::RecentMatches => "recent_matches",
            Endpoint::Heroes => "heroes",
            Endpoint::Peers => "peers",
            Endpoint::Totals => "totals",
            Endpoint::TopPlayers => "top_players",
            Endpoint::ProPlayers => "pro_players",
        };
        f.write_str(name)
    }
}
