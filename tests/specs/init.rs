// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `forerun init`.

use crate::prelude::*;

/// > forerun init creates forerun.toml in the current directory
#[test]
fn init_creates_config() {
    let project = Project::empty();
    forerun_cmd()
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Created forerun.toml"));

    let config = project.read("forerun.toml");
    assert!(config.contains("[rank]"));
    assert!(config.contains("weight = \"1-0-0\""));
}

/// > The generated config is accepted by order
#[test]
fn generated_config_is_valid() {
    let project = Project::empty();
    forerun_cmd()
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success();
    project.run(&["order"], "a\n").success().stdout("a\n");
}

/// > Refuses to overwrite an existing forerun.toml without --force
#[test]
fn init_refuses_to_overwrite_without_force() {
    let project = Project::with_config("version = 1\n# existing\n");
    forerun_cmd()
        .arg("init")
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("already exists"))
        .stderr(predicates::str::contains("--force"));
    assert!(project.read("forerun.toml").contains("# existing"));
}

/// > --force overwrites an existing forerun.toml
#[test]
fn init_force_overwrites() {
    let project = Project::with_config("version = 1\n# existing\n");
    forerun_cmd()
        .args(["init", "--force"])
        .current_dir(project.path())
        .assert()
        .success();
    assert!(!project.read("forerun.toml").contains("# existing"));
}
