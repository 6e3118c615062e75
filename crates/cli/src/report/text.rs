// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format report output.

use std::fmt::Write;

use crate::config::RankSettings;
use crate::engine::{Diagnostics, RecordSummary, StoreSnapshot};
use crate::order::RankMode;

use super::{ReportFormatter, human_secs};

/// Text format report formatter.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, snapshot: &StoreSnapshot) -> anyhow::Result<String> {
        let mut output = String::new();
        writeln!(output, "Forerun Report")?;
        writeln!(output, "==============")?;
        if let Some(updated) = snapshot.updated {
            writeln!(output, "Recorded: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        writeln!(output, "Tracked files: {}", snapshot.tracked_files)?;
        writeln!(output, "Tests: {}", snapshot.tests.len())?;
        writeln!(output)?;

        let cell = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        for test in &snapshot.tests {
            writeln!(
                output,
                "{}  duration={} runs_since_failure={} relatedness={}",
                test.id,
                cell(test.last_duration),
                cell(test.runs_since_failure),
                cell(test.change_relatedness),
            )?;
        }
        Ok(output)
    }

    fn format_empty(&self) -> String {
        "No test history recorded.\n".to_string()
    }
}

/// Resolved configuration, shown before ordering.
pub fn settings_lines(settings: &RankSettings) -> Vec<String> {
    let replay = settings
        .replay_path
        .as_ref()
        .map_or_else(|| "none".to_string(), |p| p.display().to_string());
    let mode = match &settings.mode {
        RankMode::Replay(order) => format!("replay ({} recorded ids)", order.len()),
        RankMode::Random { seed } => format!("random (seed {seed})"),
        RankMode::Score(_) => "score".to_string(),
    };
    vec![
        format!("Mode: {mode}"),
        format!("Weight: {}", settings.weights),
        format!("Level: {}", settings.level),
        format!("Normalization: {}", settings.normalization),
        format!("History length: {}", settings.hist_len),
        format!("Seed: {}", settings.seed),
        format!("Replay: {replay}"),
    ]
}

/// Ordering-phase diagnostics.
pub fn diagnostics_lines(diagnostics: &Diagnostics) -> Vec<String> {
    let mut lines = vec![
        format!("Mode: {}", diagnostics.mode),
        format!(
            "Items: {} ({} with order constraints)",
            diagnostics.items, diagnostics.constrained
        ),
        format!(
            "Changed files: {} of {} tracked ({} tokens)",
            diagnostics.changed_files, diagnostics.tracked_files, diagnostics.delta_tokens
        ),
        format!(
            "Time to compute change relatedness: {}",
            human_secs(diagnostics.change_time.as_secs_f64())
        ),
        format!(
            "Time to reorder tests: {}",
            human_secs(diagnostics.reorder_time.as_secs_f64())
        ),
    ];
    if let Some(reason) = &diagnostics.fallback {
        lines.push(format!("Kept original order: {reason}"));
    }
    lines
}

/// Recording-phase summary.
pub fn record_lines(summary: &RecordSummary) -> Vec<String> {
    vec![
        format!(
            "Recorded {} of {} reports",
            summary.recorded, summary.reports
        ),
        format!(
            "Time to collect test features: {}",
            human_secs(summary.collect_time.as_secs_f64())
        ),
    ]
}
