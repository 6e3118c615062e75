// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable run diagnostics for `--verbose`.
//!
//! Sections go to stderr so the reordered collection on stdout stays
//! machine-readable.

use std::fmt::Write;

/// Prints titled sections to stderr when enabled.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print one titled section.
    pub fn block(&self, title: &str, lines: &[String]) {
        if self.enabled {
            eprint!("{}", render_block(title, lines));
        }
    }
}

/// A section as printed: blank line, `Title:`, then indented lines.
pub fn render_block(title: &str, lines: &[String]) -> String {
    let mut out = format!("\n{title}:\n");
    for line in lines {
        // Writing to a String cannot fail
        let _ = writeln!(out, "  {line}");
    }
    out
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
