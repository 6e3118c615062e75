// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Order policy: replay, random, or score-based ranking.
//!
//! Every mode produces a [`SortKey`] per item and shares one comparator:
//! higher priority first, then lower tie-break index. Items carrying a
//! declared order constraint are then moved, in their original relative
//! order, ahead of the ranked remainder.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigError;
use crate::group::{self, GroupLevel};
use crate::score::WeightVector;

/// Priority given to items missing from a replay file.
pub const UNRANKED: f64 = f64::NEG_INFINITY;

/// Ranking mode, in precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum RankMode {
    /// Reproduce a recorded order.
    Replay(ReplayOrder),
    /// Seeded shuffle, identical across workers.
    Random { seed: u64 },
    /// Weighted feature score.
    Score(WeightVector),
}

impl RankMode {
    pub fn name(&self) -> &'static str {
        match self {
            RankMode::Replay(_) => "replay",
            RankMode::Random { .. } => "random",
            RankMode::Score(_) => "score",
        }
    }
}

/// A previously recorded order, one identifier per line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayOrder {
    positions: HashMap<String, usize>,
}

impl ReplayOrder {
    /// Read a replay file; an unreadable file is a configuration error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Replay {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Blank lines are ignored; the first occurrence of an id wins.
    pub fn parse(content: &str) -> Self {
        let mut positions = HashMap::new();
        for id in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let next = positions.len();
            positions.entry(id.to_string()).or_insert(next);
        }
        Self { positions }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Per-item ranking key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    /// Higher runs earlier.
    pub priority: f64,
    /// Lower runs earlier among equal priorities.
    pub tiebreak: usize,
}

impl SortKey {
    /// The single ordering used by every mode.
    pub fn compare(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then(self.tiebreak.cmp(&other.tiebreak))
    }
}

/// Keys from a recorded order; unlisted items follow in discovery order.
pub fn replay_keys(ids: &[String], replay: &ReplayOrder) -> Vec<SortKey> {
    ids.iter()
        .enumerate()
        .map(|(index, id)| SortKey {
            priority: replay.position(id).map_or(UNRANKED, |pos| -(pos as f64)),
            tiebreak: index,
        })
        .collect()
}

/// Keys from seeded draws over the identifier-sorted collection, pooled
/// by group.
///
/// The pre-sort makes the result independent of discovery order, so
/// workers sharing a seed agree on the order without communicating.
/// Members of one group share the group's mean draw and keep their
/// identifier rank as tie-break, so a group runs contiguously.
pub fn random_keys(ids: &[String], seed: u64, level: GroupLevel) -> Vec<SortKey> {
    let mut by_id: Vec<usize> = (0..ids.len()).collect();
    by_id.sort_by(|&a, &b| ids[a].cmp(&ids[b]).then(a.cmp(&b)));

    let mut rng = StdRng::seed_from_u64(seed);
    let sorted: Vec<String> = by_id.iter().map(|&i| ids[i].clone()).collect();
    let draws: Vec<f64> = sorted.iter().map(|_| rng.gen_range(0.0..1.0)).collect();
    let pooled = group::aggregate(&sorted, &draws, level);

    let mut keys = vec![
        SortKey {
            priority: 0.0,
            tiebreak: 0,
        };
        ids.len()
    ];
    for (rank, (index, priority)) in by_id.into_iter().zip(pooled).enumerate() {
        keys[index] = SortKey {
            priority,
            tiebreak: rank,
        };
    }
    keys
}

/// Keys from per-test scores pooled by group; ties keep discovery order.
pub fn score_keys(ids: &[String], scores: &[f64], level: GroupLevel) -> Vec<SortKey> {
    group::aggregate(ids, scores, level)
        .into_iter()
        .enumerate()
        .map(|(index, priority)| SortKey {
            priority,
            tiebreak: index,
        })
        .collect()
}

/// Indices of `keys` sorted into execution order.
pub fn sequence(keys: &[SortKey]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].compare(&keys[b]));
    order
}

/// Capability query answered by the host for each item.
pub trait OrderConstraints {
    /// True if the item declared a run-before/after or dependency constraint.
    fn has_order_constraint(&self, id: &str) -> bool;
}

impl OrderConstraints for HashSet<String> {
    fn has_order_constraint(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl OrderConstraints for BTreeSet<String> {
    fn has_order_constraint(&self, id: &str) -> bool {
        self.contains(id)
    }
}

/// No item is constrained.
pub struct Unconstrained;

impl OrderConstraints for Unconstrained {
    fn has_order_constraint(&self, _id: &str) -> bool {
        false
    }
}

/// Move constrained items, in discovery order, ahead of the ranked rest.
pub fn partition_constrained(
    ids: &[String],
    ranked: &[usize],
    constraints: &dyn OrderConstraints,
) -> Vec<usize> {
    let constrained: Vec<usize> = (0..ids.len())
        .filter(|&i| constraints.has_order_constraint(&ids[i]))
        .collect();
    if constrained.is_empty() {
        return ranked.to_vec();
    }
    let pinned: HashSet<usize> = constrained.iter().copied().collect();
    constrained
        .into_iter()
        .chain(ranked.iter().copied().filter(|i| !pinned.contains(i)))
        .collect()
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
