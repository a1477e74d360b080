//! Regression comparison against a previous run
//!
//! Rows follow the current report's order. A previous entry matches on exact
//! name equality; the first match wins when names repeat.

use crate::benchmark::result::{Report, TrialResult};
use serde::Serialize;
use std::collections::HashMap;

/// Significance threshold when none is configured (%)
pub const DEFAULT_THRESHOLD_PCT: f64 = 10.0;

/// Comparison columns for a row that has a previous-run entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Baseline {
    pub previous_hz: f64,
    pub previous_rme: f64,
    pub previous_size: usize,
    /// `None` when the previous hz is zero or the quotient is not finite
    pub percent_diff: Option<f64>,
    pub significant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub result: TrialResult,
    pub baseline: Option<Baseline>,
}

/// Direction of a row's change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Faster,
    Slower,
    Unchanged,
    /// Matched, but the difference could not be computed
    Unavailable,
    /// No previous entry
    New,
}

impl ComparisonRow {
    pub fn uncompared(result: TrialResult) -> Self {
        Self {
            result,
            baseline: None,
        }
    }

    pub fn verdict(&self) -> Verdict {
        match &self.baseline {
            None => Verdict::New,
            Some(Baseline {
                percent_diff: None, ..
            }) => Verdict::Unavailable,
            Some(b) if !b.significant => Verdict::Unchanged,
            Some(Baseline {
                percent_diff: Some(d),
                ..
            }) if *d > 0.0 => Verdict::Faster,
            Some(_) => Verdict::Slower,
        }
    }

    pub fn is_regression(&self) -> bool {
        self.verdict() == Verdict::Slower
    }
}

/// `100 * (current - previous) / previous`; positive means faster
pub fn percent_diff(current_hz: f64, previous_hz: f64) -> Option<f64> {
    if previous_hz == 0.0 {
        return None;
    }
    let diff = 100.0 * (current_hz - previous_hz) / previous_hz;
    diff.is_finite().then_some(diff)
}

/// Compare `current` against `previous`
///
/// `significant` is `|percent_diff| > threshold_pct` (strict).
pub fn compare(current: &Report, previous: &Report, threshold_pct: f64) -> Vec<ComparisonRow> {
    let mut by_name: HashMap<&str, &TrialResult> = HashMap::with_capacity(previous.len());
    for prev in previous {
        by_name.entry(prev.name.as_str()).or_insert(prev);
    }

    current
        .iter()
        .map(|result| {
            let baseline = by_name.get(result.name.as_str()).map(|prev| {
                let diff = percent_diff(result.hz, prev.hz);
                Baseline {
                    previous_hz: prev.hz,
                    previous_rme: prev.rme,
                    previous_size: prev.size,
                    percent_diff: diff,
                    significant: diff.map_or(false, |d| d.abs() > threshold_pct),
                }
            });
            ComparisonRow {
                result: result.clone(),
                baseline,
            }
        })
        .collect()
}

/// Rows for a run with no previous report
pub fn rows_without_baseline(current: &Report) -> Vec<ComparisonRow> {
    current.iter().cloned().map(ComparisonRow::uncompared).collect()
}

/// Significant slowdowns, in row order
pub fn regressions(rows: &[ComparisonRow]) -> impl Iterator<Item = &ComparisonRow> {
    rows.iter().filter(|r| r.is_regression())
}
