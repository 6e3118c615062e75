// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `forerun report`.

use crate::prelude::*;

/// > Empty history prints a placeholder
#[test]
fn report_without_history() {
    let project = Project::with_defaults();
    project
        .run(&["report"], "")
        .success()
        .stdout("No test history recorded.\n");
}

/// > Text report lists every recorded test
#[test]
fn report_lists_tests() {
    let project = Project::with_defaults();
    project.record(&[], "tests/a.py::t\tpassed\t0.5\n");
    project
        .run(&["report"], "")
        .success()
        .stdout(predicates::str::contains("tests/a.py::t"))
        .stdout(predicates::str::contains("duration=0.5"));
}

/// > JSON report carries per-test features
#[test]
fn report_json() {
    let project = Project::with_defaults();
    project.record(&[], "a\tfailed\t1.5\n");
    let output = project
        .run(&["report", "-o", "json"], "")
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["tests"][0]["id"], "a");
    assert_eq!(value["tests"][0]["last_duration"], 1.5);
    assert_eq!(value["tests"][0]["runs_since_failure"], 0.0);
}
