// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent feature store.
//!
//! Historical features live behind a [`CacheStore`] port so the engine never
//! touches global state. `.forerun/` holds one JSON file per key:
//!
//! - `forerun_data/last_duration.json`
//! - `forerun_data/runs_since_failure.json`
//! - `forerun_data/change_relatedness.json`
//! - `forerun_data/file_hashes.json`

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::defaults;
use crate::error::StoreError;
use crate::normalize::Direction;

/// Key/value persistence scoped to one project.
pub trait CacheStore {
    /// Read a record, `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace a record.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Directory-backed cache, one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("ignoring unreadable cache record {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        let content = serde_json::to_string_pretty(&value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;
        Ok(())
    }
}

/// In-memory cache for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    records: HashMap<String, Value>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), value);
        Ok(())
    }
}

/// Scalar per-test metric used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    LastDuration,
    RunsSinceFailure,
    ChangeRelatedness,
}

impl Feature {
    pub const ALL: [Feature; 3] = [
        Feature::LastDuration,
        Feature::RunsSinceFailure,
        Feature::ChangeRelatedness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::LastDuration => "last_duration",
            Feature::RunsSinceFailure => "runs_since_failure",
            Feature::ChangeRelatedness => "change_relatedness",
        }
    }

    /// Shorter durations and fewer runs since failure run earlier.
    pub fn direction(self) -> Direction {
        match self {
            Feature::LastDuration | Feature::RunsSinceFailure => Direction::LowerFirst,
            Feature::ChangeRelatedness => Direction::HigherFirst,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Test identifier to feature value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FeatureMap(BTreeMap<String, f64>);

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded value, or 0 for an id never seen.
    ///
    /// Total over all ids: unseen tests sit at the bottom of the raw range.
    pub fn value(&self, id: &str) -> f64 {
        self.0.get(id).copied().unwrap_or(0.0)
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.0.get(id).copied()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: f64) {
        self.0.insert(id.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }
}

impl FromIterator<(String, f64)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Typed access to namespaced records in a [`CacheStore`].
#[derive(Debug)]
pub struct FeatureStore<S> {
    cache: S,
}

const FILE_HASHES: &str = "file_hashes";
const UPDATED: &str = "updated";

impl<S: CacheStore> FeatureStore<S> {
    pub fn new(cache: S) -> Self {
        Self { cache }
    }

    pub fn into_inner(self) -> S {
        self.cache
    }

    /// Mapping for a feature, empty if never written.
    pub fn get(&self, feature: Feature) -> Result<FeatureMap, StoreError> {
        self.read(feature.name())
    }

    /// Replace the whole mapping for a feature.
    pub fn set(&mut self, feature: Feature, map: &FeatureMap) -> Result<(), StoreError> {
        self.write(feature.name(), map)
    }

    /// Previous run's file digests, empty on first use.
    pub fn file_hashes(&self) -> Result<BTreeMap<String, String>, StoreError> {
        self.read(FILE_HASHES)
    }

    pub fn set_file_hashes(&mut self, hashes: &BTreeMap<String, String>) -> Result<(), StoreError> {
        self.write(FILE_HASHES, hashes)
    }

    /// When historical features were last recorded.
    pub fn updated(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.read(UPDATED)
    }

    pub fn set_updated(&mut self, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.write(UPDATED, &at)
    }

    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        let key = namespaced(name);
        let Some(value) = self.cache.get(&key)? else {
            return Ok(T::default());
        };
        match serde_json::from_value(value) {
            Ok(v) => Ok(v),
            Err(e) => {
                tracing::warn!("ignoring malformed cache record {}: {}", key, e);
                Ok(T::default())
            }
        }
    }

    fn write<T: Serialize>(&mut self, name: &str, value: &T) -> Result<(), StoreError> {
        let key = namespaced(name);
        let value = serde_json::to_value(value).map_err(|source| StoreError::Encode {
            key: key.clone(),
            source,
        })?;
        self.cache.set(&key, value)
    }
}

fn namespaced(name: &str) -> String {
    format!("{}/{}", defaults::cache::NAMESPACE, name)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
