#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::response::ResultEntry;

/// Totals over all graded files
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateResult {
    /// Sum of passed tests
    pub total_passed:         u64,
    /// Sum of run tests
    pub total_count:          u64,
    /// Sum of file weights, the maximum reachable points
    pub total_weight:         f64,
    /// Sum of `score * weight`, the points reached
    pub total_weighted_score: f64,
}

impl AggregateResult {
    /// Sums up `entries`. Sums keep full precision; rounding is left to
    /// whoever displays them.
    pub fn from_entries(entries: &[ResultEntry]) -> Self {
        entries.iter().fold(Self::default(), |acc, e| Self {
            total_passed:         acc.total_passed.saturating_add(e.passed),
            total_count:          acc.total_count.saturating_add(e.count),
            total_weight:         acc.total_weight + e.weight,
            total_weighted_score: acc.total_weighted_score + e.points(),
        })
    }

    /// Reached points in percent, rounded to 2 decimals. Defined as 100 when
    /// no file carries any weight.
    pub fn percent(&self) -> f64 {
        if self.total_weight == 0.0 {
            100.0
        } else {
            round2(100.0 * self.total_weighted_score / self.total_weight)
        }
    }
}

/// Rounds to 2 decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
