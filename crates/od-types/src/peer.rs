//! Peers ("friends"): players frequently found in the same matches.

use crate::hero::percentage;
use serde::{Deserialize, Serialize};

/// Minimum games together for a peer to count as a friend.
pub const DEFAULT_FRIEND_MIN_GAMES: u32 = 3;

/// Number of friends kept in the aggregate.
pub const DEFAULT_TOP_FRIENDS: usize = 5;

/// One entry of `GET /players/{account_id}/peers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    /// The peer's account id.
    pub account_id: u32,
    /// Last match together (seconds since epoch).
    pub last_played: Option<i64>,
    /// Games together (either team).
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub games: u32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub win: u32,
    /// Games on the same team.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub with_games: u32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub with_win: u32,
    /// Games on opposing teams.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub against_games: u32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub against_win: u32,
    pub personaname: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub avatarfull: Option<String>,
    pub last_login: Option<String>,
}

impl Peer {
    /// Win rate when on the same team, as a percentage.
    pub fn win_rate(&self) -> f64 {
        percentage(self.with_win, self.with_games)
    }
}

/// Derive the top friends from the full peer list.
///
/// Keeps peers with at least `min_games` games together, ordered by games
/// descending (ties keep upstream order), truncated to `limit`.
pub fn top_friends(peers: &[Peer], min_games: u32, limit: usize) -> Vec<Peer> {
    let mut friends: Vec<Peer> = peers
        .iter()
        .filter(|peer| peer.games >= min_games)
        .cloned()
        .collect();
    friends.sort_by(|a, b| b.games.cmp(&a.games));
    friends.truncate(limit);
    friends
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_peer(account_id: u32, games: u32) -> Peer {
        Peer {
            account_id,
            games,
            ..Default::default()
        }
    }

    #[test]
    fn test_top_friends_filters_sorts_truncates() {
        let peers = vec![
            make_peer(1, 2),
            make_peer(2, 10),
            make_peer(3, 3),
            make_peer(4, 50),
            make_peer(5, 7),
            make_peer(6, 1),
            make_peer(7, 8),
            make_peer(8, 4),
        ];

        let friends = top_friends(&peers, DEFAULT_FRIEND_MIN_GAMES, DEFAULT_TOP_FRIENDS);

        let ids: Vec<u32> = friends.iter().map(|p| p.account_id).collect();
        assert_eq!(ids, vec![4, 2, 7, 5, 8]);
        assert!(friends.iter().all(|p| p.games >= 3));
        assert!(friends.windows(2).all(|w| w[0].games >= w[1].games));
    }

    #[test]
    fn test_top_friends_excludes_below_minimum() {
        let peers = vec![make_peer(1, 2), make_peer(2, 1), make_peer(3, 0)];
        assert!(top_friends(&peers, 3, 5).is_empty());
    }

    #[test]
    fn test_top_friends_ties_keep_order() {
        let peers = vec![make_peer(1, 5), make_peer(2, 5), make_peer(3, 5)];
        let ids: Vec<u32> = top_friends(&peers, 3, 2)
            .iter()
            .map(|p| p.account_id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_deserialize_null_counters() {
        let json = r#"[{"account_id": 5, "games": null, "win": 1, "with_games": null,
            "personaname": null}, {"account_id": 6, "games": 4}]"#;
        let peers: Vec<Peer> = serde_json::from_str(json).unwrap();
        assert_eq!(peers[0].games, 0);
        assert_eq!(peers[0].with_games, 0);
        assert_eq!(top_friends(&peers, 3, 5).len(), 1);
    }

    #[test]
    fn test_peer_win_rate() {
        let peer = Peer {
            with_games: 4,
            with_win: 1,
            ..Default::default()
        };
        assert_eq!(peer.win_rate(), 25.0);
    }
}
