//! od-types: Shared data structures for the OpenDota wrapped aggregator
//!
//! This crate defines the types used across the workspace:
//! - [`AccountId`] / [`normalize_identifier`] - identifier normalization
//! - [`Player`], [`RankInfo`], [`WinLoss`] - profile and standing
//! - [`MatchSummary`] - one match from the player's perspective
//! - [`HeroStat`], [`Peer`], [`TotalsEntry`] - per-hero, per-peer and lifetime aggregates
//! - [`RecordsSummary`] - records derived from a match sample and totals
//! - [`WrappedAggregate`] - the assembled view-model
//!
//! # Example
//!
//! ```rust
//! use od_types::{top_friends, AccountId, Peer};
//!
//! let account = AccountId::resolve("76561198021931370").unwrap();
//! assert_eq!(account.get(), 61665642);
//!
//! let peers = vec![Peer { account_id: 7, games: 12, ..Default::default() }];
//! assert_eq!(top_friends(&peers, 3, 5).len(), 1);
//! ```

mod aggregate;
mod de;
mod error;
mod hero;
mod identifier;
mod leaderboard;
mod match_summary;
mod peer;
mod player;
mod records;
mod totals;

pub use aggregate::{Section, WrappedAggregate};
pub use error::TypeError;
pub use hero::HeroStat;
pub use identifier::{
    normalize_identifier, AccountId, PlayerIdentifier, MAX_ACCOUNT_ID_DIGITS, STEAM_ID_BASE,
};
pub use leaderboard::{ProPlayer, TopPlayer};
pub use match_summary::{oldest_match, MatchSummary, RADIANT_SLOT_THRESHOLD};
pub use peer::{top_friends, Peer, DEFAULT_FRIEND_MIN_GAMES, DEFAULT_TOP_FRIENDS};
pub use player::{Player, Profile, RankInfo, WinLoss};
pub use records::{sanitize, RecordField, RecordsSummary};
pub use totals::{find_total, TotalsEntry};
