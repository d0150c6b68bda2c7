//! Derived per-player records.
//!
//! [`RecordsSummary`] is never fetched directly. It combines lifetime
//! [`TotalsEntry`] rows (authoritative sums and counts) with a bounded
//! sample of recent matches (used for the maxima).
//!
//! # Caveat
//!
//! The maxima are only as good as the sample: a record-breaking match that
//! is older than the sample is not seen, so `max_*` is a lower bound on the
//! true lifetime record.
//!
//! # Example
//!
//! ```rust
//! use od_types::{MatchSummary, RecordsSummary, TotalsEntry};
//!
//! let sample = vec![MatchSummary { kills: 12, ..Default::default() }];
//! let totals = vec![TotalsEntry { field: "kills".into(), n: 4.0, sum: 30.0 }];
//!
//! let records = RecordsSummary::derive(&sample, &totals);
//! assert_eq!(records.max_kills, 12.0);
//! assert_eq!(records.avg_kills, 7.5);
//! ```

use crate::totals::find_total;
use crate::{MatchSummary, TotalsEntry};
use serde::{Deserialize, Serialize};

/// Numeric fields tracked for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Kills,
    Deaths,
    Assists,
    GoldPerMin,
    Duration,
}

impl RecordField {
    /// All tracked fields.
    pub const ALL: [RecordField; 5] = [
        RecordField::Kills,
        RecordField::Deaths,
        RecordField::Assists,
        RecordField::GoldPerMin,
        RecordField::Duration,
    ];

    /// Name of the matching row in the totals response.
    pub fn totals_key(&self) -> &'static str {
        match self {
            RecordField::Kills => "kills",
            RecordField::Deaths => "deaths",
            RecordField::Assists => "assists",
            RecordField::GoldPerMin => "gold_per_min",
            RecordField::Duration => "duration",
        }
    }
}

/// Coerce a derived number into a finite, non-negative value.
#[inline]
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    sanitize((value * factor).round() / factor)
}

/// Sum, count, average and sampled maximum for one field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct FieldStats {
    sum: f64,
    count: f64,
    avg: f64,
    max: f64,
}

impl FieldStats {
    /// A field with no totals row yields all zeros, even if the sample has
    /// values: totals decide whether the field is known at all.
    fn collect(field: RecordField, sample: &[MatchSummary], totals: &[TotalsEntry]) -> Self {
        let Some(total) = find_total(totals, field.totals_key()) else {
            return Self::default();
        };

        let sum = sanitize(total.sum);
        let count = sanitize(total.n);
        let avg = if count > 0.0 { sanitize(sum / count) } else { 0.0 };

        let max = sample
            .iter()
            .filter_map(|m| m.stat(field))
            .map(sanitize)
            .fold(0.0, f64::max);

        Self {
            sum,
            count,
            avg,
            max,
        }
    }
}

/// Records derived from the match sample and lifetime totals.
///
/// Every value is finite and non-negative; empty inputs give all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsSummary {
    pub max_kills: f64,
    pub max_deaths: f64,
    pub max_assists: f64,
    pub max_gpm: f64,
    /// Longest match in the sample, seconds.
    pub max_duration: f64,

    /// Lifetime averages; one decimal place.
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    /// Lifetime averages; whole numbers.
    pub avg_gpm: f64,
    pub avg_duration: f64,

    /// Lifetime (kills + assists) / deaths, deaths floored at one.
    pub kda: f64,
}

impl RecordsSummary {
    /// Derive records from a match sample and the totals rows.
    pub fn derive(sample: &[MatchSummary], totals: &[TotalsEntry]) -> Self {
        let kills = FieldStats::collect(RecordField::Kills, sample, totals);
        let deaths = FieldStats::collect(RecordField::Deaths, sample, totals);
        let assists = FieldStats::collect(RecordField::Assists, sample, totals);
        let gpm = FieldStats::collect(RecordField::GoldPerMin, sample, totals);
        let duration = FieldStats::collect(RecordField::Duration, sample, totals);

        let kda = round_to((kills.sum + assists.sum) / deaths.sum.max(1.0), 2);

        Self {
            max_kills: kills.max,
            max_deaths: deaths.max,
            max_assists: assists.max,
            max_gpm: gpm.max,
            max_duration: duration.max,
            avg_kills: round_to(kills.avg, 1),
            avg_deaths: round_to(deaths.avg, 1),
            avg_assists: round_to(assists.avg, 1),
            avg_gpm: round_to(gpm.avg, 0),
            avg_duration: round_to(duration.avg, 0),
            kda,
        }
    }

    /// All values, for invariant checks.
    pub fn values(&self) -> [f64; 11] {
        [
            self.max_kills,
            self.max_deaths,
            self.max_assists,
            self.max_gpm,
            self.max_duration,
            self.avg_kills,
            self.avg_deaths,
            self.avg_assists,
            self.avg_gpm,
            self.avg_duration,
            self.kda,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(field: &str, n: f64, sum: f64) -> TotalsEntry {
        TotalsEntry {
            field: field.to_string(),
            n,
            sum,
        }
    }

    fn make_match(kills: u32, deaths: u32, assists: u32, gpm: Option<u32>, duration: u32) -> MatchSummary {
        MatchSummary {
            kills,
            deaths,
            assists,
            gold_per_min: gpm,
            duration,
            ..Default::default()
        }
    }

    fn full_totals() -> Vec<TotalsEntry> {
        vec![
            total("kills", 3.0, 20.0),
            total("deaths", 3.0, 10.0),
            total("assists", 3.0, 31.0),
            total("gold_per_min", 3.0, 1501.0),
            total("duration", 3.0, 6001.0),
        ]
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        let records = RecordsSummary::derive(&[], &[]);
        assert_eq!(records, RecordsSummary::default());
        assert!(records.values().iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn test_derive_full() {
        let sample = vec![
            make_match(10, 2, 15, Some(600), 2400),
            make_match(4, 5, 6, Some(450), 3100),
            make_match(6, 3, 10, None, 1800),
        ];

        let records = RecordsSummary::derive(&sample, &full_totals());

        assert_eq!(records.max_kills, 10.0);
        assert_eq!(records.max_deaths, 5.0);
        assert_eq!(records.max_assists, 15.0);
        assert_eq!(records.max_gpm, 600.0);
        assert_eq!(records.max_duration, 3100.0);

        assert_eq!(records.avg_kills, 6.7); // 20 / 3
        assert_eq!(records.avg_deaths, 3.3);
        assert_eq!(records.avg_assists, 10.3);
        assert_eq!(records.avg_gpm, 500.0); // 500.33 rounded
        assert_eq!(records.avg_duration, 2000.0);
        assert_eq!(records.kda, 5.1); // (20 + 31) / 10
    }

    #[test]
    fn test_missing_totals_row_zeroes_field() {
        let sample = vec![make_match(10, 2, 15, Some(600), 2400)];
        let totals = vec![total("deaths", 1.0, 2.0)];

        let records = RecordsSummary::derive(&sample, &totals);

        assert_eq!(records.max_kills, 0.0);
        assert_eq!(records.avg_kills, 0.0);
        assert_eq!(records.max_deaths, 2.0);
        assert_eq!(records.avg_deaths, 2.0);
    }

    #[test]
    fn test_zero_count_gives_zero_average() {
        let totals = vec![total("kills", 0.0, 15.0)];
        let records = RecordsSummary::derive(&[], &totals);
        assert_eq!(records.avg_kills, 0.0);
    }

    #[test]
    fn test_non_finite_totals_are_sanitized() {
        let totals = vec![
            total("kills", f64::NAN, f64::INFINITY),
            total("deaths", 1.0, f64::NAN),
            total("assists", -3.0, -9.0),
        ];
        let records = RecordsSummary::derive(&[make_match(3, 1, 2, None, 10)], &totals);

        assert!(records.values().iter().all(|v| v.is_finite() && *v >= 0.0));
        assert_eq!(records.avg_kills, 0.0);
        assert_eq!(records.kda, 0.0);
    }

    #[test]
    fn test_kda_without_deaths() {
        let totals = vec![total("kills", 1.0, 7.0), total("assists", 1.0, 3.0)];
        let records = RecordsSummary::derive(&[], &totals);
        assert_eq!(records.kda, 10.0);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize(-1.0), 0.0);
        assert_eq!(sanitize(2.5), 2.5);
    }
}
