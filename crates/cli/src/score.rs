// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Weighted combination of normalized features.
//!
//! Higher score always means the test runs earlier.

use std::str::FromStr;

use crate::error::ConfigError;
use crate::normalize::Normalization;
use crate::store::{Feature, FeatureMap};

/// Weights for (duration, recent failure, change relatedness), summing to 1.
///
/// The all-zero vector is kept as-is and selects random order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightVector {
    pub time: f64,
    pub fail: f64,
    pub rel: f64,
}

impl WeightVector {
    /// Normalize raw weights so they sum to 1.
    ///
    /// Returns None for negative or non-finite weights.
    pub fn new(time: f64, fail: f64, rel: f64) -> Option<Self> {
        let raw = [time, fail, rel];
        if raw.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return None;
        }
        let sum: f64 = raw.iter().sum();
        if !sum.is_finite() {
            return None;
        }
        if sum == 0.0 {
            return Some(Self::random());
        }
        Some(Self {
            time: time / sum,
            fail: fail / sum,
            rel: rel / sum,
        })
    }

    /// The random-order sentinel.
    pub fn random() -> Self {
        Self {
            time: 0.0,
            fail: 0.0,
            rel: 0.0,
        }
    }

    /// True for the all-zero sentinel.
    pub fn is_random(&self) -> bool {
        self.time == 0.0 && self.fail == 0.0 && self.rel == 0.0
    }

    /// Weight applied to a feature.
    pub fn weight(&self, feature: Feature) -> f64 {
        match feature {
            Feature::LastDuration => self.time,
            Feature::RunsSinceFailure => self.fail,
            Feature::ChangeRelatedness => self.rel,
        }
    }
}

impl FromStr for WeightVector {
    type Err = ConfigError;

    /// Parse hyphen-separated weights such as `1-0-0` or `0.4-0.2-0.2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidWeight {
            input: s.to_string(),
        };
        let parts: Vec<&str> = s.trim().split('-').collect();
        let [time, fail, rel] = parts.as_slice() else {
            return Err(invalid());
        };
        let parse = |p: &str| p.trim().parse::<f64>().map_err(|_| invalid());
        Self::new(parse(time)?, parse(fail)?, parse(rel)?).ok_or_else(invalid)
    }
}

impl std::fmt::Display for WeightVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.time, self.fail, self.rel)
    }
}

/// Combine the three features into one score per id, in `ids` order.
///
/// Ids missing from a feature map contribute a raw value of 0.
pub fn combine(
    ids: &[String],
    features: &[(Feature, &FeatureMap)],
    weights: &WeightVector,
    normalization: Normalization,
) -> Vec<f64> {
    let mut scores = vec![0.0; ids.len()];
    for (feature, map) in features {
        let weight = weights.weight(*feature);
        if weight == 0.0 {
            continue;
        }
        let raw: Vec<f64> = ids.iter().map(|id| map.value(id)).collect();
        let normalized = normalization.apply(&raw, feature.direction());
        for (score, h) in scores.iter_mut().zip(normalized) {
            *score += weight * h;
        }
    }
    scores
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod tests;
