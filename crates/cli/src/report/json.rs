// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format report output.

use crate::engine::StoreSnapshot;

use super::ReportFormatter;

/// JSON format report formatter.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, snapshot: &StoreSnapshot) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }

    fn format_empty(&self) -> String {
        r#"{"tracked_files": 0, "tests": []}"#.to_string()
    }
}
