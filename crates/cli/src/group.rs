// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test grouping and group-level score aggregation.
//!
//! Given `folder/test_file.py::TestClass::test_method[param1]`:
//! - param: the identifier itself
//! - method: `folder/test_file.py::TestClass::test_method`
//! - file: `folder/test_file.py`
//! - folder: `folder`

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ConfigError;

/// Granularity at which scores are pooled before ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupLevel {
    /// Each parameterized case is its own group.
    #[default]
    Param,
    /// Parameter suffix stripped.
    Method,
    /// Containing file.
    File,
    /// Containing directory.
    Folder,
}

impl FromStr for GroupLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "param" => Ok(GroupLevel::Param),
            "method" | "function" => Ok(GroupLevel::Method),
            "file" | "module" => Ok(GroupLevel::File),
            "folder" | "directory" => Ok(GroupLevel::Folder),
            _ => Err(ConfigError::InvalidLevel {
                input: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for GroupLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupLevel::Param => "param",
            GroupLevel::Method => "method",
            GroupLevel::File => "file",
            GroupLevel::Folder => "folder",
        };
        f.write_str(s)
    }
}

const PARAM_OPEN: char = '[';
const QUALIFIER_SEP: &str = "::";
const PATH_SEP: char = '/';

/// Group key of a test identifier at `level`.
pub fn group_key(id: &str, level: GroupLevel) -> &str {
    let without_param = id.split(PARAM_OPEN).next().unwrap_or(id);
    let file = without_param
        .split(QUALIFIER_SEP)
        .next()
        .unwrap_or(without_param);
    match level {
        GroupLevel::Param => id,
        GroupLevel::Method => without_param,
        GroupLevel::File => file,
        GroupLevel::Folder => file.rsplit_once(PATH_SEP).map_or("", |(dir, _)| dir),
    }
}

/// Replace each score with the mean score of its group.
pub fn aggregate(ids: &[String], scores: &[f64], level: GroupLevel) -> Vec<f64> {
    if level == GroupLevel::Param {
        return scores.to_vec();
    }
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for (id, score) in ids.iter().zip(scores) {
        let entry = sums.entry(group_key(id, level)).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }
    ids.iter()
        .map(|id| {
            let (sum, count) = sums[group_key(id, level)];
            sum / count as f64
        })
        .collect()
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
