// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `tally show` command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn tally() -> Command {
    cargo_bin_cmd!("tally")
}

fn export_dir_with_issue() -> TempDir {
    let dir = TempDir::new().unwrap();
    let issue = json!({
        "key": "PROJ-7",
        "fields": {
            "issuetype": { "name": "User Story" },
            "priority": { "name": "Major" },
            "created": "2021-03-01T09:00:00.000+0000",
            "status": { "name": "Done" },
            "creator": { "displayName": "Alice" },
            "assignee": { "displayName": "Bob" }
        },
        "changelog": { "histories": [
            { "created": "2021-03-02T09:00:00.000+0000",
              "items": [{ "field": "status", "fromString": "Open", "toString": "In Review" }] },
            { "created": "2021-03-03T09:00:00.000+0000",
              "items": [{ "field": "status", "fromString": "In Review", "toString": "In Progress" }] },
            { "created": "2021-03-04T09:00:00.000+0000",
              "items": [{ "field": "status", "fromString": "In Progress", "toString": "Done" }] }
        ] }
    });
    std::fs::write(dir.path().join("proj-7.json"), issue.to_string()).unwrap();
    dir
}

#[test]
fn show_prints_timeline() {
    let dir = export_dir_with_issue();
    tally()
        .arg("show")
        .arg("PROJ-7")
        .arg("-p")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[User Story] PROJ-7"))
        .stdout(predicate::str::contains("Open -> In Review -> In Progress -> Done"))
        .stdout(predicate::str::contains("Status intervals"))
        .stdout(predicate::str::contains("- In Review: 1"));
}

#[test]
fn show_json_output() {
    let dir = export_dir_with_issue();
    let output = tally()
        .arg("show")
        .arg("PROJ-7")
        .arg("-p")
        .arg(dir.path())
        .arg("-o")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["key"], "PROJ-7");
    assert_eq!(value["rejections"]["in_review"], 1);
    assert_eq!(value["intervals"][0]["status"], "Open");
}

#[test]
fn show_unknown_key_fails() {
    let dir = export_dir_with_issue();
    tally()
        .arg("show")
        .arg("PROJ-404")
        .arg("-p")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue not found: PROJ-404"));
}
