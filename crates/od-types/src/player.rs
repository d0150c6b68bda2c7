//! Player profile, rank and win/loss types.

use serde::{Deserialize, Serialize};

/// Base URL for OpenDota's rank medal images.
const RANK_ICON_BASE_URL: &str = "https://www.opendota.com/assets/images/dota2/rank_icons";

/// Medal names indexed by the tens digit of the rank tier (1-based).
const MEDALS: [&str; 8] = [
    "Herald", "Guardian", "Crusader", "Archon", "Legend", "Ancient", "Divine", "Immortal",
];

/// Identity and cosmetic attributes of a player.
///
/// A snapshot taken at fetch time; nothing here is cached across requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// OpenDota account id.
    pub account_id: u32,
    /// Steam display name.
    pub personaname: Option<String>,
    /// Pro/verified name, if any.
    pub name: Option<String>,
    /// 64-bit Steam community id as a string.
    pub steamid: Option<String>,
    /// Small avatar URL.
    pub avatar: Option<String>,
    /// Medium avatar URL.
    pub avatarmedium: Option<String>,
    /// Full-size avatar URL.
    pub avatarfull: Option<String>,
    /// Steam profile URL.
    pub profileurl: Option<String>,
    /// Country code, if the player shares it.
    pub loccountrycode: Option<String>,
    /// Last login timestamp as reported upstream.
    pub last_login: Option<String>,
    /// Dota Plus subscriber.
    pub plus: Option<bool>,
}

impl Profile {
    /// Best available name: verified name, then persona name.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.personaname.as_deref())
            .unwrap_or("Anonymous")
    }
}

/// Response of `GET /players/{account_id}`.
///
/// OpenDota answers unknown accounts with a body whose `profile` is missing
/// or null, so [`Player::exists`] is the authoritative existence check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Profile, absent for accounts OpenDota does not track.
    #[serde(default)]
    pub profile: Option<Profile>,
    /// Rank tier: tens digit is the medal, ones digit the stars.
    pub rank_tier: Option<u32>,
    /// Position on the global leaderboard (Immortal only).
    pub leaderboard_rank: Option<u32>,
    /// OpenDota's computed rating, if any.
    pub computed_rating: Option<f64>,
}

impl Player {
    /// Returns true if the response describes a tracked account.
    pub fn exists(&self) -> bool {
        self.profile.is_some()
    }

    /// Rank information, or `None` when the player is unranked.
    pub fn rank(&self) -> Option<RankInfo> {
        if self.rank_tier.is_none() && self.leaderboard_rank.is_none() {
            return None;
        }
        Some(RankInfo {
            rank_tier: self.rank_tier,
            leaderboard_rank: self.leaderboard_rank,
        })
    }
}

/// A player's ranked standing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankInfo {
    /// Tens digit = medal bracket (1..=8), ones digit = stars.
    pub rank_tier: Option<u32>,
    /// Leaderboard position, when the player is on it.
    pub leaderboard_rank: Option<u32>,
}

impl RankInfo {
    /// Medal bracket (tens digit), 0 when unranked.
    pub fn medal(&self) -> u32 {
        self.rank_tier.map_or(0, |tier| tier / 10)
    }

    /// Medal name such as "Legend", or "Unranked".
    pub fn medal_name(&self) -> &'static str {
        match self.medal() {
            m @ 1..=8 => MEDALS[(m - 1) as usize],
            _ => "Unranked",
        }
    }

    /// Stars within the medal (ones digit), 0 when unranked.
    pub fn stars(&self) -> u32 {
        self.rank_tier.map_or(0, |tier| tier % 10)
    }

    /// URL of the medal icon.
    pub fn icon_url(&self) -> String {
        format!("{}/rank_icon_{}.png", RANK_ICON_BASE_URL, self.medal())
    }

    /// URL of the star overlay for this rank.
    pub fn star_url(&self) -> String {
        format!("{}/rank_star_{}.png", RANK_ICON_BASE_URL, self.stars())
    }
}

/// Response of `GET /players/{account_id}/wl`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    /// Matches won.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub win: u32,
    /// Matches lost.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub lose: u32,
}

impl WinLoss {
    /// Total number of decided matches.
    pub fn total(&self) -> u32 {
        self.win.saturating_add(self.lose)
    }

    /// Win rate as a percentage, 0 when no games were played.
    pub fn win_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => f64::from(self.win) / f64::from(total) * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_without_profile_does_not_exist() {
        let player: Player = serde_json::from_str(r#"{"profile": null}"#).unwrap();
        assert!(!player.exists());

        let player: Player = serde_json::from_str("{}").unwrap();
        assert!(!player.exists());
    }

    #[test]
    fn test_player_deserialize() {
        let json = r#"{
            "profile": {
                "account_id": 111620041,
                "personaname": "SumaiL",
                "name": null,
                "avatarfull": "https://example.invalid/a.jpg",
                "plus": true
            },
            "rank_tier": 80,
            "leaderboard_rank": 12
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();

        assert!(player.exists());
        let profile = player.profile.as_ref().unwrap();
        assert_eq!(profile.account_id, 111620041);
        assert_eq!(profile.display_name(), "SumaiL");

        let rank = player.rank().unwrap();
        assert_eq!(rank.medal_name(), "Immortal");
        assert_eq!(rank.leaderboard_rank, Some(12));
    }

    #[test]
    fn test_unranked_player_has_no_rank() {
        let player = Player {
            profile: Some(Profile::default()),
            ..Default::default()
        };
        assert!(player.rank().is_none());
    }

    #[test]
    fn test_rank_medal_and_stars() {
        let rank = RankInfo {
            rank_tier: Some(54),
            leaderboard_rank: None,
        };
        assert_eq!(rank.medal(), 5);
        assert_eq!(rank.medal_name(), "Legend");
        assert_eq!(rank.stars(), 4);
        assert!(rank.icon_url().ends_with("rank_icon_5.png"));
        assert!(rank.star_url().ends_with("rank_star_4.png"));
    }

    #[test]
    fn test_rank_unknown_tier_is_unranked() {
        assert_eq!(RankInfo::default().medal_name(), "Unranked");
        assert_eq!(RankInfo::default().stars(), 0);
        assert!(RankInfo::default().icon_url().ends_with("rank_icon_0.png"));

        let bogus = RankInfo {
            rank_tier: Some(93),
            leaderboard_rank: None,
        };
        assert_eq!(bogus.medal_name(), "Unranked");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut profile = Profile::default();
        assert_eq!(profile.display_name(), "Anonymous");

        profile.personaname = Some("persona".to_string());
        assert_eq!(profile.display_name(), "persona");

        profile.name = Some("Pro Name".to_string());
        assert_eq!(profile.display_name(), "Pro Name");
    }

    #[test]
    fn test_win_loss() {
        let wl = WinLoss { win: 3, lose: 1 };
        assert_eq!(wl.total(), 4);
        assert_eq!(wl.win_rate(), 75.0);
        assert_eq!(WinLoss::default().win_rate(), 0.0);
    }
}
