// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Feature normalization.
//!
//! A flat vector (every value equal, including the empty-history all-zero
//! case) carries no preference signal and normalizes to all zeros.

use std::str::FromStr;

use crate::error::ConfigError;

/// Which raw values mean "run earlier".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Larger raw value is higher priority (relatedness).
    HigherFirst,
    /// Smaller raw value is higher priority (duration, runs since failure).
    LowerFirst,
}

/// Scaling strategy applied to each feature vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Normalization {
    #[default]
    MinMax,
    ZScore,
}

impl FromStr for Normalization {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min-max" | "minmax" => Ok(Normalization::MinMax),
            "z-score" | "zscore" => Ok(Normalization::ZScore),
            _ => Err(ConfigError::InvalidNormalization {
                input: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Normalization::MinMax => write!(f, "min-max"),
            Normalization::ZScore => write!(f, "z-score"),
        }
    }
}

impl Normalization {
    /// Scale `values` and orient them so larger always means run earlier.
    pub fn apply(self, values: &[f64], direction: Direction) -> Vec<f64> {
        match self {
            Normalization::MinMax => {
                let scaled = min_max(values);
                match direction {
                    Direction::HigherFirst => scaled,
                    Direction::LowerFirst => scaled.into_iter().map(|x| 1.0 - x).collect(),
                }
            }
            Normalization::ZScore => {
                let scaled = z_score(values);
                match direction {
                    Direction::HigherFirst => scaled,
                    Direction::LowerFirst => scaled.into_iter().map(|x| -x).collect(),
                }
            }
        }
    }
}

/// Min-max scaling to `[0, 1]`; a zero range yields all zeros.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = bounds(values) else {
        return Vec::new();
    };
    let range = max - min;
    if range > 0.0 {
        values.iter().map(|x| (x - min) / range).collect()
    } else {
        vec![0.0; values.len()]
    }
}

/// Standard score; a zero standard deviation yields all zeros.
pub fn z_score(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev > 0.0 {
        values.iter().map(|x| (x - mean) / std_dev).collect()
    } else {
        vec![0.0; values.len()]
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
