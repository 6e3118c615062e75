// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Post-run feature update.
//!
//! Only the call phase of items that actually ran is recorded; skipped
//! items and setup/teardown reports are ignored.

use crate::collection::{Outcome, Phase, TestReport};
use crate::config::defaults::DURATION_PRECISION;
use crate::store::FeatureMap;

/// Reports that count towards historical features.
pub fn executed(reports: &[TestReport]) -> impl Iterator<Item = &TestReport> {
    reports
        .iter()
        .filter(|r| r.phase == Phase::Call && r.outcome != Outcome::Skipped)
}

/// Round to the recorded duration precision.
pub fn round_duration(secs: f64) -> f64 {
    let scale = 10f64.powi(DURATION_PRECISION);
    (secs * scale).round() / scale
}

/// Overwrite each executed item's last duration.
pub fn update_durations(durations: &mut FeatureMap, reports: &[TestReport]) -> usize {
    let mut count = 0;
    for report in executed(reports) {
        durations.insert(report.id.clone(), round_duration(report.duration));
        count += 1;
    }
    count
}

/// Reset on failure, otherwise count one more run, capped at `hist_len`.
pub fn update_runs_since_failure(runs: &mut FeatureMap, reports: &[TestReport], hist_len: u32) {
    let cap = f64::from(hist_len);
    for report in executed(reports) {
        let next = if report.outcome == Outcome::Failed {
            0.0
        } else {
            (runs.value(&report.id) + 1.0).min(cap)
        };
        runs.insert(report.id.clone(), next);
    }
}

#[cfg(test)]
#[path = "feedback_tests.rs"]
mod tests;
