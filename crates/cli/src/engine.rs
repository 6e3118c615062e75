// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Prioritization engine.
//!
//! Two sequential phases per session:
//! 1. [`Engine::prioritize`] before execution: detect changes, rank, partition.
//! 2. [`Engine::record`] after execution: update historical features.

use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;

use crate::change::{ChangeDetector, Delta};
use crate::collection::{Collection, TestReport};
use crate::config::RankSettings;
use crate::error::Result;
use crate::feedback;
use crate::order::{self, OrderConstraints, RankMode};
use crate::score;
use crate::store::{CacheStore, Feature, FeatureMap, FeatureStore};

/// Display-only facts about the ordering phase.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub mode: &'static str,
    pub items: usize,
    pub constrained: usize,
    pub tracked_files: usize,
    pub changed_files: usize,
    pub delta_tokens: usize,
    #[serde(serialize_with = "as_secs")]
    pub change_time: Duration,
    #[serde(serialize_with = "as_secs")]
    pub reorder_time: Duration,
    /// Set when ranking failed and the original order was kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

/// Display-only facts about the recording phase.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordSummary {
    pub reports: usize,
    pub recorded: usize,
    #[serde(serialize_with = "as_secs")]
    pub collect_time: Duration,
}

fn as_secs<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Ranking engine bound to one project's feature store.
pub struct Engine<S> {
    store: FeatureStore<S>,
}

impl<S: CacheStore> Engine<S> {
    pub fn new(store: FeatureStore<S>) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> FeatureStore<S> {
        self.store
    }

    /// Compute the execution order as a permutation of collection indices.
    ///
    /// The file hash index and the relatedness feature are persisted on every
    /// call regardless of mode.
    pub fn prioritize(
        &mut self,
        settings: &RankSettings,
        collection: &Collection,
        detector: &ChangeDetector,
        constraints: &dyn OrderConstraints,
    ) -> Result<(Vec<usize>, Diagnostics)> {
        let ids = collection.ids();
        let mut diagnostics = Diagnostics {
            mode: settings.mode.name(),
            items: ids.len(),
            ..Default::default()
        };

        let change_start = Instant::now();
        let previous = self.store.file_hashes()?;
        let scan = detector.scan()?;
        self.store.set_file_hashes(&scan.index)?;
        let delta = Delta::between(&previous, &scan.index);
        let relatedness = delta.relatedness_map(&ids);
        self.store.set(Feature::ChangeRelatedness, &relatedness)?;
        diagnostics.tracked_files = scan.index.len();
        diagnostics.changed_files = delta.changed_files.len();
        diagnostics.delta_tokens = delta.tokens.len();
        diagnostics.change_time = change_start.elapsed();
        tracing::debug!(
            "{} of {} tracked files changed ({} tokens)",
            diagnostics.changed_files,
            diagnostics.tracked_files,
            diagnostics.delta_tokens
        );

        let reorder_start = Instant::now();
        let keys = match &settings.mode {
            RankMode::Replay(replay) => order::replay_keys(&ids, replay),
            RankMode::Random { seed } => order::random_keys(&ids, *seed, settings.level),
            RankMode::Score(weights) => {
                let durations = self.store.get(Feature::LastDuration)?;
                let runs = self.store.get(Feature::RunsSinceFailure)?;
                let scores = score::combine(
                    &ids,
                    &[
                        (Feature::LastDuration, &durations),
                        (Feature::RunsSinceFailure, &runs),
                        (Feature::ChangeRelatedness, &relatedness),
                    ],
                    weights,
                    settings.normalization,
                );
                order::score_keys(&ids, &scores, settings.level)
            }
        };
        let ranked = order::sequence(&keys);
        let sequence = order::partition_constrained(&ids, &ranked, constraints);
        diagnostics.constrained = ids
            .iter()
            .filter(|id| constraints.has_order_constraint(id))
            .count();
        diagnostics.reorder_time = reorder_start.elapsed();

        Ok((sequence, diagnostics))
    }

    /// Reorder `collection` in place, keeping the original order if ranking fails.
    ///
    /// Configuration errors are still returned; they must abort the session.
    pub fn prioritize_or_keep(
        &mut self,
        settings: &RankSettings,
        collection: &mut Collection,
        detector: &ChangeDetector,
        constraints: &dyn OrderConstraints,
    ) -> Result<Diagnostics> {
        match self.prioritize(settings, collection, detector, constraints) {
            Ok((sequence, diagnostics)) => {
                collection.apply(&sequence);
                Ok(diagnostics)
            }
            Err(e) if e.is_config() => Err(e),
            Err(e) => {
                tracing::warn!("prioritization failed, keeping original order: {}", e);
                Ok(Diagnostics {
                    mode: settings.mode.name(),
                    items: collection.len(),
                    fallback: Some(e.to_string()),
                    ..Default::default()
                })
            }
        }
    }

    /// Fold execution outcomes into the historical features.
    pub fn record(&mut self, reports: &[TestReport], hist_len: u32) -> Result<RecordSummary> {
        let start = Instant::now();

        let mut durations = self.store.get(Feature::LastDuration)?;
        let recorded = feedback::update_durations(&mut durations, reports);
        self.store.set(Feature::LastDuration, &durations)?;

        let mut runs = self.store.get(Feature::RunsSinceFailure)?;
        feedback::update_runs_since_failure(&mut runs, reports, hist_len);
        self.store.set(Feature::RunsSinceFailure, &runs)?;

        self.store.set_updated(Utc::now())?;

        Ok(RecordSummary {
            reports: reports.len(),
            recorded,
            collect_time: start.elapsed(),
        })
    }

    /// Snapshot of every stored feature, for reporting.
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        snapshot(&self.store)
    }
}

/// Every persisted record, joined per test.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<chrono::DateTime<Utc>>,
    pub tracked_files: usize,
    pub tests: Vec<TestFeatures>,
}

/// Stored features of one test; absent values are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct TestFeatures {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs_since_failure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_relatedness: Option<f64>,
}

/// Read every record from a store.
pub fn snapshot<S: CacheStore>(store: &FeatureStore<S>) -> Result<StoreSnapshot> {
    let maps: Vec<(Feature, FeatureMap)> = Feature::ALL
        .iter()
        .map(|f| -> Result<(Feature, FeatureMap)> { Ok((*f, store.get(*f)?)) })
        .collect::<Result<_>>()?;

    let mut ids: std::collections::BTreeSet<&String> = std::collections::BTreeSet::new();
    for (_, map) in &maps {
        ids.extend(map.iter().map(|(id, _)| id));
    }
    let lookup = |feature: Feature, id: &str| {
        maps.iter()
            .find(|(f, _)| *f == feature)
            .and_then(|(_, m)| m.get(id))
    };
    let tests = ids
        .into_iter()
        .map(|id| TestFeatures {
            id: id.clone(),
            last_duration: lookup(Feature::LastDuration, id),
            runs_since_failure: lookup(Feature::RunsSinceFailure, id),
            change_relatedness: lookup(Feature::ChangeRelatedness, id),
        })
        .collect();

    Ok(StoreSnapshot {
        updated: store.updated()?,
        tracked_files: store.file_hashes()?.len(),
        tests,
    })
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
