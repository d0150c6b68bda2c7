//! Lifetime totals per tracked field.

use crate::records::sanitize;
use serde::{Deserialize, Serialize};

/// One entry of `GET /players/{account_id}/totals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsEntry {
    /// Field name, e.g. `kills` or `gold_per_min`.
    pub field: String,
    /// Number of matches contributing to `sum`.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub n: f64,
    /// Lifetime sum.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub sum: f64,
}

impl TotalsEntry {
    /// Per-match average, 0 when no matches contributed.
    pub fn average(&self) -> f64 {
        if self.n > 0.0 {
            sanitize(self.sum / self.n)
        } else {
            0.0
        }
    }
}

/// Look up the entry for `field`.
pub fn find_total<'a>(totals: &'a [TotalsEntry], field: &str) -> Option<&'a TotalsEntry> {
    totals.iter().find(|t| t.field == field)
}
