// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `forerun record`.

use crate::prelude::*;

fn feature(project: &Project, name: &str) -> serde_json::Value {
    serde_json::from_str(&project.read(&format!(".forerun/forerun_data/{name}.json"))).unwrap()
}

/// > Durations are stored rounded to milliseconds
#[test]
fn record_stores_durations() {
    let project = Project::with_defaults();
    project.record(&[], "a\tpassed\t0.12345\nb\tfailed\t2\n");
    let durations = feature(&project, "last_duration");
    assert_eq!(durations["a"], 0.123);
    assert_eq!(durations["b"], 2.0);
}

/// > Failures reset runs since failure, passes increment it
#[test]
fn record_tracks_runs_since_failure() {
    let project = Project::with_defaults();
    project.record(&[], "a\tpassed\t1\nb\tpassed\t1\n");
    project.record(&[], "a\tpassed\t1\nb\tfailed\t1\n");
    let runs = feature(&project, "runs_since_failure");
    assert_eq!(runs["a"], 2.0);
    assert_eq!(runs["b"], 0.0);
}

/// > --hist-len caps runs since failure
#[test]
fn hist_len_caps_runs() {
    let project = Project::with_defaults();
    for _ in 0..3 {
        project.record(&["--hist-len", "2"], "a\tpassed\t1\n");
    }
    assert_eq!(feature(&project, "runs_since_failure")["a"], 2.0);
}

/// > hist_len from forerun.toml caps runs since failure
#[test]
fn config_hist_len_caps_runs() {
    let project = Project::with_config("[rank]\nhist_len = 1\n");
    project.record(&[], "a\tpassed\t1\n");
    project.record(&[], "a\tpassed\t1\n");
    assert_eq!(feature(&project, "runs_since_failure")["a"], 1.0);
}

/// > Skipped tests and setup phases do not update history
#[test]
fn skipped_and_setup_are_ignored() {
    let project = Project::with_defaults();
    project.record(&[], "a\tskipped\t0\nb\tpassed\t5\tsetup\nc\tpassed\t1\n");
    let durations = feature(&project, "last_duration");
    assert!(durations.get("a").is_none());
    assert!(durations.get("b").is_none());
    assert_eq!(durations["c"], 1.0);
}

/// > JSON lines are accepted
#[test]
fn record_json_lines() {
    let project = Project::with_defaults();
    project.record(
        &["-f", "json"],
        "{\"id\": \"a\", \"outcome\": \"failed\", \"duration\": 0.5}\n",
    );
    assert_eq!(feature(&project, "runs_since_failure")["a"], 0.0);
}

/// > Malformed outcome records are an error
#[test]
fn malformed_record_fails() {
    let project = Project::with_defaults();
    project
        .run(&["record"], "a\tpassed\n")
        .code(1)
        .stderr(predicates::str::contains("line 1"));
}

/// > A corrupt cache record is treated as empty history
#[test]
fn corrupt_cache_is_ignored() {
    let project = Project::with_defaults();
    project.file(".forerun/forerun_data/last_duration.json", "{broken");
    project.record(&[], "a\tpassed\t1\n");
    assert_eq!(feature(&project, "last_duration")["a"], 1.0);
}
