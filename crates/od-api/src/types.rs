//! API request and response types.

use chrono::SecondsFormat;
use od_types::{AccountId, WrappedAggregate};
use serde::{Deserialize, Serialize};

/// Query parameters for leaderboard endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    /// Maximum number of entries to return.
    pub limit: Option<usize>,
}

/// Wrapped aggregate plus values derived for display.
#[derive(Debug, Serialize)]
pub struct WrappedResponse {
    #[serde(flatten)]
    pub aggregate: WrappedAggregate,
    /// Best available player name.
    pub display_name: String,
    /// Overall win rate, percent, one decimal.
    pub win_rate: f64,
    /// Medal name such as "Legend", absent when unranked.
    pub medal: Option<String>,
    /// Stars within the medal.
    pub stars: Option<u32>,
    /// Medal icon URL.
    pub medal_icon: Option<String>,
    /// Start of the first known match, RFC 3339.
    pub first_match_date: Option<String>,
}

impl From<WrappedAggregate> for WrappedResponse {
    fn from(aggregate: WrappedAggregate) -> Self {
        let display_name = aggregate
            .player
            .profile
            .as_ref()
            .map(|p| p.display_name().to_string())
            .unwrap_or_default();
        let win_rate = (aggregate.win_rate() * 10.0).round() / 10.0;
        let rank = aggregate.rank.filter(|r| r.medal() > 0);
        let first_match_date = aggregate
            .first_match
            .as_ref()
            .and_then(|m| m.started_at())
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true));

        Self {
            display_name,
            win_rate,
            medal: rank.map(|r| r.medal_name().to_string()),
            stars: rank.map(|r| r.stars()),
            medal_icon: rank.map(|r| r.icon_url()),
            first_match_date,
            aggregate,
        }
    }
}

/// Response of the existence check.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExistsResponse {
    /// Canonical account id.
    pub account_id: AccountId,
    /// Whether OpenDota tracks the account.
    pub exists: bool,
}

/// A truncated leaderboard.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse<T> {
    /// Entries, in upstream order.
    pub players: Vec<T>,
    /// Number of entries returned.
    pub count: usize,
    /// Whether more entries exist beyond the limit.
    pub has_more: bool,
}

impl<T> LeaderboardResponse<T> {
    /// Keep the first `limit` entries.
    pub fn truncated(mut players: Vec<T>, limit: usize) -> Self {
        let has_more = players.len() > limit;
        players.truncate(limit);
        Self {
            count: players.len(),
            players,
            has_more,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use od_types::{MatchSummary, Player, Profile, RecordsSummary, WinLoss};

    fn aggregate() -> WrappedAggregate {
        let player = Player {
            profile: Some(Profile {
                account_id: 1,
                personaname: Some("someone".into()),
                ..Default::default()
            }),
            rank_tier: Some(73),
            ..Default::default()
        };
        WrappedAggregate {
            account_id: AccountId::new(1),
            rank: player.rank(),
            player,
            win_loss: WinLoss { win: 2, lose: 1 },
            total_matches: 3,
            recent_matches: Vec::new(),
            first_match: Some(MatchSummary {
                start_time: 1_300_000_000,
                ..Default::default()
            }),
            heroes: Vec::new(),
            peers: Vec::new(),
            top_friends: Vec::new(),
            records: RecordsSummary::default(),
            totals: Vec::new(),
            degraded: Vec::new(),
        }
    }

    #[test]
    fn test_wrapped_response_derivations() {
        let response = WrappedResponse::from(aggregate());
        assert_eq!(response.display_name, "someone");
        assert_eq!(response.win_rate, 66.7);
        assert_eq!(response.medal.as_deref(), Some("Divine"));
        assert_eq!(response.stars, Some(3));
        assert_eq!(
            response.first_match_date.as_deref(),
            Some("2011-03-13T07:06:40Z")
        );
    }

    #[test]
    fn test_wrapped_response_flattens_aggregate() {
        let json = serde_json::to_value(WrappedResponse::from(aggregate())).unwrap();
        assert_eq!(json["account_id"], 1);
        assert_eq!(json["total_matches"], 3);
        assert_eq!(json["medal"], "Divine");
        assert!(json["degraded"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_unranked_has_no_medal() {
        let mut aggregate = aggregate();
        aggregate.rank = None;
        let response = WrappedResponse::from(aggregate);
        assert!(response.medal.is_none());
        assert!(response.stars.is_none());
    }

    #[test]
    fn test_leaderboard_truncation() {
        let board = LeaderboardResponse::truncated(vec![1, 2, 3], 2);
        assert_eq!(board.players, vec![1, 2]);
        assert_eq!(board.count, 2);
        assert!(board.has_more);

        let board = LeaderboardResponse::truncated(vec![1], 5);
        assert!(!board.has_more);
    }
}
