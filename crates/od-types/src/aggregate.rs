//! The wrapped view-model.

use crate::{
    AccountId, HeroStat, MatchSummary, Peer, Player, RankInfo, RecordsSummary, TotalsEntry,
    WinLoss,
};
use serde::{Deserialize, Serialize};

/// Optional parts of the aggregate that can degrade without failing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    RecentMatches,
    Heroes,
    Peers,
    Totals,
    MatchSample,
    FirstMatch,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::RecentMatches => "recent_matches",
            Section::Heroes => "heroes",
            Section::Peers => "peers",
            Section::Totals => "totals",
            Section::MatchSample => "match_sample",
            Section::FirstMatch => "first_match",
        }
    }
}

/// Everything the presentation layer needs for one player.
///
/// Built fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedAggregate {
    /// Canonical account id the aggregate was built for.
    pub account_id: AccountId,

    /// Profile snapshot (plus the raw rank fields).
    pub player: Player,

    /// Rank, absent when unranked.
    pub rank: Option<RankInfo>,

    pub win_loss: WinLoss,

    /// Always `win + lose`, never the sample length.
    pub total_matches: u32,

    pub recent_matches: Vec<MatchSummary>,

    /// Oldest known match; best-effort.
    pub first_match: Option<MatchSummary>,

    pub heroes: Vec<HeroStat>,

    /// Every peer, ordered by games together.
    pub peers: Vec<Peer>,

    /// Peers with enough games together, top few only.
    pub top_friends: Vec<Peer>,

    pub records: RecordsSummary,

    pub totals: Vec<TotalsEntry>,

    /// Optional sections that fell back to empty or absent.
    pub degraded: Vec<Section>,
}

impl WrappedAggregate {
    /// Overall win rate as a percentage.
    pub fn win_rate(&self) -> f64 {
        self.win_loss.win_rate()
    }

    /// Returns true if any optional section degraded.
    pub fn is_partial(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// Returns true if `section` degraded.
    pub fn is_degraded(&self, section: Section) -> bool {
        self.degraded.contains(&section)
    }
}
