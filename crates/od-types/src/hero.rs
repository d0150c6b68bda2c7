//! Per-hero aggregate statistics.

use serde::{Deserialize, Serialize};

/// One entry of `GET /players/{account_id}/heroes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroStat {
    /// Hero id.
    pub hero_id: u32,
    /// Last time this hero was played (seconds since epoch).
    pub last_played: Option<i64>,
    /// Games played as this hero.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub games: u32,
    /// Games won as this hero.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub win: u32,
    /// Games with this hero on the player's team.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub with_games: u32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub with_win: u32,
    /// Games with this hero on the opposing team.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub against_games: u32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub against_win: u32,
}

impl HeroStat {
    /// Win rate playing this hero, as a percentage.
    pub fn win_rate(&self) -> f64 {
        percentage(self.win, self.games)
    }
}

pub(crate) fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}
