//! Best-effort search for a player's first match.
//!
//! OpenDota only pages match history newest-first, so the oldest match is
//! found by probing a descending list of offsets and keeping the smallest
//! `start_time` seen, then refining once just past the best offset.
//!
//! # Caveat
//!
//! This is a heuristic. When the history length falls between two probe
//! offsets, the deepest successful page may not contain the true oldest
//! match. Callers must treat the result as best-effort.
//!
//! A failed probe and an empty page are both skipped, but they are kept
//! apart in [`ProbeOutcome`] so transient failures show up in the logs.

use od_ingestion::{DataSource, IngestionError};
use od_types::{oldest_match, AccountId, MatchSummary};

/// Offsets probed by default, coarse to fine.
pub const DEFAULT_PROBE_OFFSETS: [u32; 8] = [50_000, 20_000, 10_000, 5_000, 2_000, 1_000, 500, 100];

/// Tuning for [`find_oldest_match`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    /// Offsets to probe, in order.
    pub offsets: Vec<u32>,
    /// Page size for each coarse probe.
    pub batch_size: u32,
    /// Distance past the best offset for the refinement probe.
    pub refine_step: u32,
    /// Page size for the refinement probe.
    pub refine_batch_size: u32,
    /// End the coarse loop at the first page that returns data.
    ///
    /// Pages are newest-first, so with descending offsets the first hit
    /// is already the deepest page that exists.
    pub stop_at_first_hit: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            offsets: DEFAULT_PROBE_OFFSETS.to_vec(),
            batch_size: 100,
            refine_step: 1_000,
            refine_batch_size: 200,
            stop_at_first_hit: false,
        }
    }
}

impl FinderConfig {
    /// Upper bound on upstream calls for one search.
    pub fn max_calls(&self) -> usize {
        self.offsets.len() + 1
    }

    pub fn with_offsets(mut self, offsets: Vec<u32>) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn with_stop_at_first_hit(mut self, stop: bool) -> Self {
        self.stop_at_first_hit = stop;
        self
    }
}

/// Result of probing one page.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The oldest match in the page.
    Found(MatchSummary),
    /// The page was empty: the history is shorter than the offset.
    Empty,
    /// The request failed.
    Failed(IngestionError),
}

impl ProbeOutcome {
    /// The match, if any.
    pub fn found(self) -> Option<MatchSummary> {
        match self {
            ProbeOutcome::Found(m) => Some(m),
            _ => None,
        }
    }
}

/// Fetch one page and reduce it to its oldest match.
pub async fn probe<S: DataSource>(
    source: &S,
    account: AccountId,
    offset: u32,
    limit: u32,
) -> ProbeOutcome {
    match source.get_matches(account, limit, offset).await {
        Ok(page) => match oldest_match(&page) {
            Some(m) => ProbeOutcome::Found(m.clone()),
            None => ProbeOutcome::Empty,
        },
        Err(err) => ProbeOutcome::Failed(err),
    }
}

/// Search for the oldest match of `account`.
///
/// Probes run one at a time. Returns `None` when no probe produced a match;
/// the caller falls back to whatever sample it already holds.
pub async fn find_oldest_match<S: DataSource>(
    source: &S,
    account: AccountId,
    config: &FinderConfig,
) -> Option<MatchSummary> {
    let mut best: Option<(u32, MatchSummary)> = None;

    for &offset in &config.offsets {
        match probe(source, account, offset, config.batch_size).await {
            ProbeOutcome::Found(candidate) => {
                let older = best
                    .as_ref()
                    .map_or(true, |(_, current)| candidate.start_time < current.start_time);
                if older {
                    best = Some((offset, candidate));
                }
                if config.stop_at_first_hit {
                    break;
                }
            }
            ProbeOutcome::Empty => {
                tracing::debug!("No matches for {} at offset {}", account, offset);
            }
            ProbeOutcome::Failed(err) => {
                tracing::warn!("Probe for {} at offset {} failed: {}", account, offset, err);
            }
        }
    }

    let (best_offset, mut oldest) = best?;

    let refine_offset = best_offset.saturating_add(config.refine_step);
    match probe(source, account, refine_offset, config.refine_batch_size).await {
        ProbeOutcome::Found(candidate) if candidate.start_time < oldest.start_time => {
            oldest = candidate;
        }
        ProbeOutcome::Failed(err) => {
            tracing::warn!(
                "Refinement probe for {} at offset {} failed: {}",
                account,
                refine_offset,
                err
            );
        }
        _ => {}
    }

    tracing::debug!(
        "Oldest match for {}: {} (start_time {}, best offset {})",
        account,
        oldest.match_id,
        oldest.start_time,
        best_offset
    );

    Some(oldest)
}
