// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host-facing input formats.
//!
//! The host hands over the discovered collection before execution and
//! per-item outcome records afterwards, either as tab-separated text or as
//! JSON lines.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::order::OrderConstraints;

/// Input encoding for `order` and `record`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Tab-separated columns, one item per line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Malformed host input.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// One discovered work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestItem {
    pub id: String,
    /// Host markers such as `order` or `dependency`.
    #[serde(default)]
    pub markers: Vec<String>,
}

impl TestItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markers: Vec::new(),
        }
    }

    pub fn with_markers(mut self, markers: &[&str]) -> Self {
        self.markers = markers.iter().map(|m| m.to_string()).collect();
        self
    }
}

/// The discovered collection, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub items: Vec<TestItem>,
}

impl Collection {
    pub fn new(items: Vec<TestItem>) -> Self {
        Self { items }
    }

    /// Parse `id[\tmarker,marker]` lines or JSON lines.
    pub fn parse(content: &str, format: InputFormat) -> Result<Self, ParseError> {
        let mut items = Vec::new();
        for (line, raw) in non_blank_lines(content) {
            let item = match format {
                InputFormat::Text => {
                    let mut cols = raw.split('\t');
                    let id = cols.next().unwrap_or_default().trim();
                    let markers = cols
                        .next()
                        .map(|m| {
                            m.split(',')
                                .map(str::trim)
                                .filter(|m| !m.is_empty())
                                .map(String::from)
                                .collect()
                        })
                        .unwrap_or_default();
                    TestItem {
                        id: id.to_string(),
                        markers,
                    }
                }
                InputFormat::Json => serde_json::from_str(raw).map_err(|e| ParseError {
                    line,
                    message: e.to_string(),
                })?,
            };
            if item.id.is_empty() {
                return Err(ParseError {
                    line,
                    message: "empty test identifier".to_string(),
                });
            }
            items.push(item);
        }
        Ok(Self { items })
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids carrying any of `markers`.
    pub fn constrained(&self, markers: &[String]) -> MarkerConstraints {
        let ids = self
            .items
            .iter()
            .filter(|item| item.markers.iter().any(|m| markers.contains(m)))
            .map(|item| item.id.clone())
            .collect();
        MarkerConstraints { ids }
    }

    /// Reorder items by a permutation of their indices.
    pub fn apply(&mut self, order: &[usize]) {
        let mut slots: Vec<Option<TestItem>> = self.items.drain(..).map(Some).collect();
        self.items = order.iter().filter_map(|&i| slots[i].take()).collect();
    }
}

/// Constraint oracle answering from host markers.
#[derive(Debug, Clone, Default)]
pub struct MarkerConstraints {
    ids: BTreeSet<String>,
}

impl MarkerConstraints {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl OrderConstraints for MarkerConstraints {
    fn has_order_constraint(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// Outcome of one execution phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
    #[serde(other)]
    Other,
}

impl Outcome {
    fn parse(s: &str) -> Self {
        match s {
            "passed" => Outcome::Passed,
            "failed" => Outcome::Failed,
            "skipped" => Outcome::Skipped,
            _ => Outcome::Other,
        }
    }
}

/// Execution phase a report belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    #[default]
    Call,
    Teardown,
}

/// Per-item outcome delivered after execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub id: String,
    pub outcome: Outcome,
    /// Elapsed seconds.
    pub duration: f64,
    #[serde(default)]
    pub phase: Phase,
}

impl TestReport {
    pub fn new(id: impl Into<String>, outcome: Outcome, duration: f64) -> Self {
        Self {
            id: id.into(),
            outcome,
            duration,
            phase: Phase::Call,
        }
    }

    /// Parse `id\toutcome\tduration[\tphase]` lines or JSON lines.
    pub fn parse_all(content: &str, format: InputFormat) -> Result<Vec<Self>, ParseError> {
        non_blank_lines(content)
            .map(|(line, raw)| match format {
                InputFormat::Text => parse_text_report(raw).map_err(|message| ParseError {
                    line,
                    message,
                }),
                InputFormat::Json => serde_json::from_str(raw).map_err(|e| ParseError {
                    line,
                    message: e.to_string(),
                }),
            })
            .collect()
    }
}

fn parse_text_report(raw: &str) -> Result<TestReport, String> {
    let cols: Vec<&str> = raw.split('\t').map(str::trim).collect();
    let (id, outcome, duration, phase) = match cols.as_slice() {
        [id, outcome, duration] => (*id, *outcome, *duration, None),
        [id, outcome, duration, phase] => (*id, *outcome, *duration, Some(*phase)),
        _ => return Err("expected id, outcome, duration and optional phase".to_string()),
    };
    if id.is_empty() {
        return Err("empty test identifier".to_string());
    }
    let duration: f64 = duration
        .parse()
        .map_err(|_| format!("invalid duration {duration:?}"))?;
    let phase = match phase {
        None | Some("call") => Phase::Call,
        Some("setup") => Phase::Setup,
        Some("teardown") => Phase::Teardown,
        Some(other) => return Err(format!("unknown phase {other:?}")),
    };
    Ok(TestReport {
        id: id.to_string(),
        outcome: Outcome::parse(outcome),
        duration,
        phase,
    })
}

fn non_blank_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty())
}

#[cfg(test)]
#[path = "collection_tests.rs"]
mod tests;
