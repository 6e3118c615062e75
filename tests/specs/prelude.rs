// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the forerun binary against temp projects.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run the forerun binary
pub fn forerun_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("forerun"));
    cmd.env_remove("FORERUN_CONFIG").env_remove("FORERUN_LOG");
    cmd
}

/// Temporary project directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Project without a config file.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Project with a minimal forerun.toml.
    pub fn with_defaults() -> Self {
        Self::with_config("version = 1\n")
    }

    /// Project with the given forerun.toml content.
    pub fn with_config(config: &str) -> Self {
        let project = Self::empty();
        project.file("forerun.toml", config);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    /// Run `forerun <args>` in the project with `stdin` as input.
    pub fn run(&self, args: &[&str], stdin: &str) -> assert_cmd::assert::Assert {
        forerun_cmd()
            .args(args)
            .current_dir(self.path())
            .write_stdin(stdin)
            .assert()
    }

    /// Run `forerun order` and return the ordered ids.
    pub fn order(&self, args: &[&str], collection: &str) -> Vec<String> {
        let mut full = vec!["order"];
        full.extend_from_slice(args);
        let output = self.run(&full, collection).success().get_output().stdout.clone();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Run `forerun record` with the given outcome lines.
    pub fn record(&self, args: &[&str], reports: &str) {
        let mut full = vec!["record"];
        full.extend_from_slice(args);
        self.run(&full, reports).success();
    }
}
