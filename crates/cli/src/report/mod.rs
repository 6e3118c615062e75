// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report formatting.
//!
//! Renders the stored feature snapshot for `forerun report` and the
//! display-only diagnostics printed in verbose mode.

mod json;
mod text;

use crate::cli::OutputFormat;
use crate::engine::StoreSnapshot;

pub use json::JsonFormatter;
pub use text::{TextFormatter, diagnostics_lines, record_lines, settings_lines};

/// Trait for formatting a feature store snapshot into various output formats.
pub trait ReportFormatter {
    /// Format a non-empty snapshot.
    fn format(&self, snapshot: &StoreSnapshot) -> anyhow::Result<String>;

    /// Return output for when nothing has been recorded yet.
    fn format_empty(&self) -> String;
}

/// Format a report based on output format, returning the output string.
pub fn format_report(format: OutputFormat, snapshot: &StoreSnapshot) -> anyhow::Result<String> {
    let formatter: Box<dyn ReportFormatter> = match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    if snapshot.tests.is_empty() && snapshot.tracked_files == 0 {
        Ok(formatter.format_empty())
    } else {
        formatter.format(snapshot)
    }
}

/// Format seconds for display.
pub fn human_secs(secs: f64) -> String {
    if secs < 1.0 {
        format!("{:.1}ms", secs * 1000.0)
    } else {
        format!("{:.2}s", secs)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
