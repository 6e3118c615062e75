// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Change detection and change relatedness.
//!
//! Tracked files are content-hashed each run and compared with the previous
//! run's index. Tokens from changed paths form the delta; a test's
//! relatedness is how many of its own tokens appear in the delta.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::file_reader::FileContent;
use crate::store::FeatureMap;
use crate::walker::{FileWalker, WalkStats};

/// Root-relative path to content digest.
pub type FileHashIndex = BTreeMap<String, String>;

#[allow(clippy::expect_used)]
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+").expect("token regex is valid"));

/// Lower-cased alphanumeric runs of `s`.
pub fn tokenize(s: &str) -> BTreeSet<String> {
    let lower = s.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// SHA-256 hex digest of a file's content.
pub fn hash_file(path: &Path) -> Result<String, Error> {
    let content = FileContent::read(path).map_err(|source| Error::Hash {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = Sha256::digest(content.as_bytes());
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

/// Files changed since the previous run and their path tokens.
#[derive(Debug, Clone, Default)]
pub struct Delta {
    pub changed_files: Vec<String>,
    pub tokens: BTreeSet<String>,
}

impl Delta {
    /// Compare two indexes. An empty previous index is the bootstrap case:
    /// nothing counts as changed.
    pub fn between(previous: &FileHashIndex, current: &FileHashIndex) -> Self {
        if previous.is_empty() {
            return Self::default();
        }
        let mut delta = Self::default();
        for (path, digest) in current {
            if previous.get(path) != Some(digest) {
                delta.tokens.extend(tokenize(path));
                delta.changed_files.push(path.clone());
            }
        }
        delta
    }

    /// Size of the overlap between the id's tokens and the delta.
    pub fn relatedness(&self, id: &str) -> usize {
        if self.tokens.is_empty() {
            return 0;
        }
        tokenize(id)
            .iter()
            .filter(|t| self.tokens.contains(*t))
            .count()
    }

    /// Relatedness of every id, as a feature map.
    pub fn relatedness_map(&self, ids: &[String]) -> FeatureMap {
        ids.iter()
            .map(|id| (id.clone(), self.relatedness(id) as f64))
            .collect()
    }
}

/// Result of hashing the tracked tree.
#[derive(Debug, Clone)]
pub struct Scan {
    pub index: FileHashIndex,
    pub stats: WalkStats,
    pub elapsed: Duration,
}

/// Hashes every tracked file under a root.
pub struct ChangeDetector {
    root: PathBuf,
    walker: FileWalker,
}

impl ChangeDetector {
    pub fn new(root: impl Into<PathBuf>, walker: FileWalker) -> Self {
        Self {
            root: root.into(),
            walker,
        }
    }

    /// Hash all tracked files in parallel.
    pub fn scan(&self) -> Result<Scan, Error> {
        let start = Instant::now();
        let (files, stats) = self.walker.walk_collect(&self.root);
        let index = files
            .par_iter()
            .map(|f| Ok((f.relative.clone(), hash_file(&f.path)?)))
            .collect::<Result<FileHashIndex, Error>>()?;
        tracing::debug!("hashed {} tracked files", index.len());
        Ok(Scan {
            index,
            stats,
            elapsed: start.elapsed(),
        })
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
