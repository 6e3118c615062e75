// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `forerun order`.

use crate::prelude::*;

const COLLECTION: &str = "tests/test_a.py::test_slow\n\
                          tests/test_b.py::test_fast\n\
                          tests/test_c.py::test_medium\n";

const DURATIONS: &str = "tests/test_a.py::test_slow\tpassed\t3.0\n\
                         tests/test_b.py::test_fast\tpassed\t1.0\n\
                         tests/test_c.py::test_medium\tpassed\t2.0\n";

// =============================================================================
// First Run
// =============================================================================

/// > Without history the collection is returned unchanged
#[test]
fn first_run_keeps_discovery_order() {
    let project = Project::with_defaults();
    let order = project.order(&["--weight", "1-1-1"], COLLECTION);
    assert_eq!(
        order,
        vec![
            "tests/test_a.py::test_slow",
            "tests/test_b.py::test_fast",
            "tests/test_c.py::test_medium",
        ]
    );
}

/// > Ordering persists the file hash index under .forerun/
#[test]
fn order_writes_hash_index() {
    let project = Project::with_defaults();
    project.file("src/app.py", "print('hi')\n");
    project.order(&[], COLLECTION);

    let hashes: serde_json::Value =
        serde_json::from_str(&project.read(".forerun/forerun_data/file_hashes.json")).unwrap();
    assert!(hashes.get("src/app.py").is_some());
    assert!(
        project
            .path()
            .join(".forerun/forerun_data/change_relatedness.json")
            .exists()
    );
}

/// > Works without any config file
#[test]
fn order_without_config_uses_defaults() {
    let project = Project::empty();
    let order = project.order(&[], "b\na\n");
    assert_eq!(order, vec!["b", "a"]);
}

// =============================================================================
// Score Mode
// =============================================================================

/// > Weight 1-0-0 runs the fastest tests first
#[test]
fn duration_weight_runs_fastest_first() {
    let project = Project::with_defaults();
    project.record(&[], DURATIONS);
    let order = project.order(&["--weight", "1-0-0"], COLLECTION);
    assert_eq!(
        order,
        vec![
            "tests/test_b.py::test_fast",
            "tests/test_c.py::test_medium",
            "tests/test_a.py::test_slow",
        ]
    );
}

/// > Weight 0-1-0 runs recently failed tests first
#[test]
fn failure_weight_runs_failed_first() {
    let project = Project::with_defaults();
    project.record(&[], DURATIONS);
    project.record(&[], "tests/test_c.py::test_medium\tfailed\t2.0\n");
    let order = project.order(&["--weight", "0-1-0"], COLLECTION);
    assert_eq!(order[0], "tests/test_c.py::test_medium");
}

/// > Weight from forerun.toml is used when no flag is given
#[test]
fn config_weight_is_applied() {
    let project = Project::with_config("[rank]\nweight = \"0-1-0\"\n");
    project.record(&[], DURATIONS);
    project.record(&[], "tests/test_b.py::test_fast\tfailed\t1.0\n");
    project.record(&[], "tests/test_a.py::test_slow\tpassed\t3.0\n");
    let order = project.order(&[], COLLECTION);
    assert_eq!(order[0], "tests/test_b.py::test_fast");
}

/// > Changed source files promote related tests
#[test]
fn relatedness_weight_promotes_changed_code() {
    let project = Project::with_defaults();
    project.file("src/parser.py", "v1\n");
    project.file("src/network.py", "v1\n");
    let collection = "tests/test_network.py::test_send\ntests/test_parser.py::test_parse\n";

    // bootstrap run only records hashes
    let first = project.order(&["--weight", "0-0-1"], collection);
    assert_eq!(first[0], "tests/test_network.py::test_send");

    project.file("src/parser.py", "v2\n");
    let second = project.order(&["--weight", "0-0-1"], collection);
    assert_eq!(second[0], "tests/test_parser.py::test_parse");
}

/// > A visible cache directory is not tracked as changed source
#[test]
fn visible_cache_dir_is_not_scanned() {
    let project = Project::with_config("[cache]\ndir = \"cache\"\n");
    project.file("src/app.py", "print('hi')\n");
    let collection = "tests/test_app.py::test_first\ntests/test_data.py::test_last\n";

    project.order(&["--weight", "0-0-1"], collection);
    project.record(
        &[],
        "tests/test_app.py::test_first\tpassed\t1.0\n\
         tests/test_data.py::test_last\tpassed\t1.0\n",
    );
    let order = project.order(&["--weight", "0-0-1"], collection);
    assert_eq!(
        order,
        vec!["tests/test_app.py::test_first", "tests/test_data.py::test_last"]
    );

    let hashes: serde_json::Value =
        serde_json::from_str(&project.read("cache/forerun_data/file_hashes.json")).unwrap();
    let tracked: Vec<&String> = hashes.as_object().unwrap().keys().collect();
    assert!(hashes.get("src/app.py").is_some());
    assert!(
        tracked.iter().all(|path| !path.starts_with("cache/")),
        "cache files tracked: {tracked:?}"
    );
}

/// > File level keeps tests of one file together
#[test]
fn file_level_groups_tests() {
    let project = Project::with_defaults();
    project.record(
        &[],
        "x.py::a\tpassed\t1.0\n\
         y.py::a\tpassed\t1.5\n\
         x.py::b\tpassed\t4.0\n\
         y.py::b\tpassed\t1.5\n",
    );
    let order = project.order(
        &["--weight", "1-0-0", "--level", "file"],
        "x.py::a\ny.py::a\nx.py::b\ny.py::b\n",
    );
    assert_eq!(order, vec!["y.py::a", "y.py::b", "x.py::a", "x.py::b"]);
}

// =============================================================================
// Replay And Random
// =============================================================================

/// > Replay reproduces a recorded order; unlisted tests follow
#[test]
fn replay_reproduces_order() {
    let project = Project::with_defaults();
    project.file("replay.txt", "C\nA\nB\n");
    let order = project.order(&["--replay", "replay.txt"], "A\nB\nC\nD\n");
    assert_eq!(order, vec!["C", "A", "B", "D"]);
}

/// > Replay path from forerun.toml resolves against the project root
#[test]
fn config_replay_resolves_from_root() {
    let project = Project::with_config("[rank]\nreplay = \"ci/order.txt\"\n");
    project.file("ci/order.txt", "B\nA\n");
    let order = project.order(&[], "A\nB\n");
    assert_eq!(order, vec!["B", "A"]);
}

/// > Same seed gives the same order regardless of discovery order
#[test]
fn random_order_is_shared_across_workers() {
    let project = Project::with_defaults();
    let forward = project.order(&["--weight", "0-0-0", "--seed", "11"], "a\nb\nc\nd\ne\nf\n");
    let backward = project.order(&["--weight", "0-0-0", "--seed", "11"], "f\ne\nd\nc\nb\na\n");
    assert_eq!(forward, backward);
}

/// > Random order at file level keeps tests of one file together
#[test]
fn random_file_level_groups_tests() {
    let project = Project::with_defaults();
    let order = project.order(
        &["--weight", "0-0-0", "--seed", "5", "--level", "file"],
        "x.py::a\ny.py::a\nz.py::a\nx.py::b\ny.py::b\nz.py::b\n",
    );
    let mut files: Vec<&str> = order
        .iter()
        .map(|id| id.split("::").next().unwrap())
        .collect();
    files.dedup();
    assert_eq!(files.len(), 3, "files interleaved: {order:?}");
}

// =============================================================================
// Constraints And Formats
// =============================================================================

/// > Tests with order markers keep their relative order at the front
#[test]
fn constrained_tests_run_first() {
    let project = Project::with_defaults();
    project.record(&[], "A\tpassed\t3.0\nB\tpassed\t1.0\nC\tpassed\t2.0\nD\tpassed\t0.5\n");
    let order = project.order(&[], "A\torder\nB\nC\tdependency\nD\n");
    assert_eq!(order, vec!["A", "C", "D", "B"]);
}

/// > Custom constraint markers replace the defaults
#[test]
fn custom_constraint_markers() {
    let project = Project::with_config("[rank]\nconstraint_markers = [\"serial\"]\n");
    project.record(&[], "A\tpassed\t3.0\nB\tpassed\t1.0\n");
    let order = project.order(&[], "A\tserial\nB\torder\n");
    assert_eq!(order, vec!["A", "B"]);
}

/// > JSON lines in, JSON array out
#[test]
fn json_input_and_output() {
    let project = Project::with_defaults();
    let output = project
        .run(
            &["order", "-f", "json", "-o", "json"],
            "{\"id\": \"a\"}\n{\"id\": \"b\", \"markers\": [\"order\"]}\n",
        )
        .success()
        .get_output()
        .stdout
        .clone();
    let ids: Vec<String> = serde_json::from_slice(&output).unwrap();
    assert_eq!(ids, vec!["b", "a"]);
}

/// > --input reads the collection from a file
#[test]
fn input_from_file() {
    let project = Project::with_defaults();
    project.file("collection.txt", "one\ntwo\n");
    let order = project.order(&["--input", "collection.txt"], "");
    assert_eq!(order, vec!["one", "two"]);
}

/// > Malformed collection input is an error
#[test]
fn malformed_collection_fails() {
    let project = Project::with_defaults();
    project
        .run(&["order", "-f", "json"], "not json\n")
        .code(1)
        .stderr(predicates::str::contains("invalid test collection"));
}

/// > Verbose output goes to stderr and leaves stdout clean
#[test]
fn verbose_reports_to_stderr() {
    let project = Project::with_defaults();
    project
        .run(&["order", "-v"], "a\nb\n")
        .success()
        .stdout("a\nb\n")
        .stderr(predicates::str::contains("Mode: score"));
}

/// > An unusable cache keeps the original order and still succeeds
#[test]
fn broken_cache_keeps_original_order() {
    let project = Project::with_defaults();
    project.file(".forerun", "not a directory\n");
    project
        .run(&["order", "--weight", "1-0-0"], "b\na\nc\n")
        .success()
        .stdout("b\na\nc\n")
        .stderr(predicates::str::contains("keeping original order"));
}
