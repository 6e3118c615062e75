// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project context shared by every command.

use std::path::{Path, PathBuf};

use crate::change::ChangeDetector;
use crate::config::{self, Config};
use crate::discovery;
use crate::error::ConfigError;
use crate::store::{FeatureStore, FileCache};
use crate::walker::{FileWalker, WalkerConfig};

/// Root directory plus loaded configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl Project {
    /// Load an explicit config, or discover one upwards from `cwd`.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let config_path = match explicit {
            Some(path) => Some(cwd.join(path)),
            None => discovery::find_config(cwd),
        };
        let config = match &config_path {
            Some(path) => config::load(path)?,
            None => Config::default(),
        };
        let root = discovery::project_root(config_path.as_deref(), cwd);
        tracing::debug!("project root: {}", root.display());
        Ok(Self {
            root,
            config,
            config_path,
        })
    }

    /// Directory holding the persisted features.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.config.cache.dir)
    }

    pub fn store(&self) -> FeatureStore<FileCache> {
        FeatureStore::new(FileCache::new(self.cache_dir()))
    }

    /// Change detector over tracked sources, never scanning the cache itself.
    pub fn detector(&self) -> Result<ChangeDetector, ConfigError> {
        let config = WalkerConfig::from_changes(&self.config.changes)
            .skip_dir(&self.root, &self.config.cache.dir);
        let walker = FileWalker::new(config)?;
        Ok(ChangeDetector::new(&self.root, walker))
    }
}
