// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures shared by unit tests: temp projects, source trees, id lists.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::{NamedTempFile, TempDir};

use crate::config::defaults::CONFIG_FILE;
use crate::store::FeatureMap;

/// Temp project root holding a minimal forerun.toml.
pub fn temp_project() -> TempDir {
    temp_project_with_config("version = 1\n")
}

/// Temp project root whose forerun.toml has `config` as content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), config).unwrap();
    dir
}

/// Write `(relative path, content)` pairs under `root`, creating directories.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Standalone temp file; dropping the handle removes it.
pub fn temp_file_with_content(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Temp file with one entry per line, e.g. a replay order.
pub fn temp_file_with_lines(lines: &[&str]) -> NamedTempFile {
    let mut content = lines.join("\n");
    content.push('\n');
    temp_file_with_content(&content)
}

/// Owned test identifiers.
pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Feature map from `(id, value)` pairs.
pub fn feature_map(entries: &[(&str, f64)]) -> FeatureMap {
    entries.iter().map(|(id, v)| (id.to_string(), *v)).collect()
}
