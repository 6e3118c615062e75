// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Enumeration of tracked source files.
//!
//! Uses the `ignore` crate so `.gitignore` rules and hidden entries (such as
//! the cache directory) are skipped, then filters by source/exclude globs
//! matched against root-relative paths.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::config::ChangesConfig;
use crate::error::ConfigError;

/// Walker settings.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum directory depth (None = unlimited).
    pub max_depth: Option<usize>,
    /// Respect `.gitignore` and friends.
    pub git_ignore: bool,
    /// Skip hidden files and directories.
    pub hidden: bool,
    /// Tracked patterns; a file must match one.
    pub source_patterns: Vec<String>,
    /// Excluded patterns.
    pub exclude_patterns: Vec<String>,
    /// Root-relative directories never descended into.
    pub skip_dirs: Vec<PathBuf>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            git_ignore: true,
            hidden: true,
            source_patterns: crate::config::defaults::changes::source(),
            exclude_patterns: Vec::new(),
            skip_dirs: Vec::new(),
        }
    }
}

impl WalkerConfig {
    pub fn from_changes(changes: &ChangesConfig) -> Self {
        Self {
            source_patterns: changes.source.clone(),
            exclude_patterns: changes.exclude.clone(),
            ..Default::default()
        }
    }

    /// Skip `dir` (absolute or root-relative) when it lies under `root`.
    pub fn skip_dir(mut self, root: &Path, dir: &Path) -> Self {
        let rel = if dir.is_absolute() {
            match dir.strip_prefix(root) {
                Ok(rel) => rel,
                Err(_) => return self,
            }
        } else {
            dir
        };
        if rel.as_os_str().is_empty() {
            return self;
        }
        self.skip_dirs.push(rel.to_path_buf());
        self
    }
}

/// A tracked file.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path.
    pub path: PathBuf,
    /// Root-relative path with `/` separators.
    pub relative: String,
    /// Size in bytes.
    pub size: u64,
}

/// Walk counters.
#[derive(Debug, Clone, Default)]
pub struct WalkStats {
    pub files_found: usize,
    pub errors: usize,
}

/// Collects tracked files under a root.
pub struct FileWalker {
    pub(crate) config: WalkerConfig,
    source: GlobSet,
    exclude: GlobSet,
}

impl FileWalker {
    /// Build a walker, compiling its glob patterns.
    pub fn new(config: WalkerConfig) -> Result<Self, ConfigError> {
        let source = build_glob_set(&config.source_patterns)?;
        let exclude = build_glob_set(&config.exclude_patterns)?;
        Ok(Self {
            config,
            source,
            exclude,
        })
    }

    /// Walk `root`, returning tracked files sorted by relative path.
    pub fn walk_collect(&self, root: &Path) -> (Vec<WalkedFile>, WalkStats) {
        let mut builder = WalkBuilder::new(root);
        builder
            .git_ignore(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .ignore(self.config.git_ignore)
            .hidden(self.config.hidden)
            .require_git(false)
            .max_depth(self.config.max_depth);
        if !self.config.skip_dirs.is_empty() {
            let skipped: Vec<PathBuf> =
                self.config.skip_dirs.iter().map(|d| root.join(d)).collect();
            builder.filter_entry(move |entry| !skipped.iter().any(|d| entry.path() == d.as_path()));
        }

        let mut files = Vec::new();
        let mut stats = WalkStats::default();

        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("walk error: {}", e);
                    stats.errors += 1;
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            if !self.source.is_match(rel) || self.exclude.is_match(rel) {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(WalkedFile {
                path: path.to_path_buf(),
                relative: relative_key(rel),
                size,
            });
        }

        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        stats.files_found = files.len();
        (files, stats)
    }
}

fn relative_key(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ConfigError::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::Glob {
        pattern: patterns.join(", "),
        source,
    })
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
