//! Match summary types.
//!
//! This module provides [`MatchSummary`], one completed match seen from the
//! perspective of the player whose history it came from. Both
//! `/players/{id}/matches` and `/players/{id}/recentMatches` return this shape.

use crate::RecordField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Player slots below this value are on the Radiant side.
pub const RADIANT_SLOT_THRESHOLD: u16 = 128;

/// One completed match from a player's perspective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Unique match id.
    pub match_id: u64,

    /// Team-slot encoding; values below 128 are Radiant.
    pub player_slot: u16,

    /// Whether the Radiant side won.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub radiant_win: bool,

    /// Match length in seconds.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub duration: u32,

    /// Match start (seconds since Unix epoch).
    pub start_time: i64,

    /// Hero played.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub hero_id: u32,

    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub kills: u32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub deaths: u32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub assists: u32,

    pub gold_per_min: Option<u32>,
    pub xp_per_min: Option<u32>,
    pub last_hits: Option<u32>,
    pub hero_damage: Option<u32>,
    pub tower_damage: Option<u32>,
    pub hero_healing: Option<u32>,

    pub game_mode: Option<u32>,
    pub lobby_type: Option<u32>,
    pub party_size: Option<u32>,
    pub average_rank: Option<u32>,
    pub leaver_status: Option<u32>,
}

impl MatchSummary {
    /// Returns true if the player was on the Radiant side.
    #[inline]
    pub fn is_radiant(&self) -> bool {
        self.player_slot < RADIANT_SLOT_THRESHOLD
    }

    /// Returns true if the player's side won.
    #[inline]
    pub fn is_win(&self) -> bool {
        self.is_radiant() == self.radiant_win
    }

    /// Kills plus assists per death, deaths floored at one.
    pub fn kda(&self) -> f64 {
        f64::from(self.kills + self.assists) / f64::from(self.deaths.max(1))
    }

    /// Start time as a UTC timestamp.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.start_time, 0)
    }

    /// Value of a tracked record field, if the match reports it.
    pub fn stat(&self, field: RecordField) -> Option<f64> {
        match field {
            RecordField::Kills => Some(f64::from(self.kills)),
            RecordField::Deaths => Some(f64::from(self.deaths)),
            RecordField::Assists => Some(f64::from(self.assists)),
            RecordField::GoldPerMin => self.gold_per_min.map(f64::from),
            RecordField::Duration => Some(f64::from(self.duration)),
        }
    }
}

/// The match with the smallest start time, if any.
pub fn oldest_match(matches: &[MatchSummary]) -> Option<&MatchSummary> {
    matches.iter().min_by_key(|m| m.start_time)
}
