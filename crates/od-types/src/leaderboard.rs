//! Global leaderboard payloads (`/topPlayers`, `/proPlayers`).

use serde::{Deserialize, Serialize};

/// One entry of `GET /topPlayers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopPlayer {
    pub account_id: u32,
    pub personaname: Option<String>,
    pub name: Option<String>,
    pub avatarfull: Option<String>,
    pub profileurl: Option<String>,
    pub loccountrycode: Option<String>,
    pub computed_mmr: Option<f64>,
    pub rating: Option<f64>,
    pub rank_tier: Option<u32>,
    pub team_name: Option<String>,
    pub is_pro: Option<bool>,
}

/// One entry of `GET /proPlayers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProPlayer {
    pub account_id: u32,
    pub steamid: Option<String>,
    pub personaname: Option<String>,
    pub name: Option<String>,
    pub avatarfull: Option<String>,
    pub profileurl: Option<String>,
    pub country_code: Option<String>,
    pub fantasy_role: Option<u32>,
    pub team_id: Option<u64>,
    pub team_name: Option<String>,
    pub team_tag: Option<String>,
    pub is_locked: Option<bool>,
    pub is_pro: Option<bool>,
    pub last_match_time: Option<String>,
}

impl ProPlayer {
    /// Pro name if set, else persona name.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.personaname.as_deref())
            .unwrap_or("Unknown")
    }
}
