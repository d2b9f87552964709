// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `tally report` command.

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

fn export_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_issue(dir: &TempDir, name: &str, value: serde_json::Value) {
    std::fs::write(dir.path().join(name), value.to_string()).unwrap();
}

fn task_through_todo(key: &str) -> serde_json::Value {
    json!({
        "key": key,
        "fields": {
            "issuetype": { "name": "Task" },
            "priority": { "name": "Major" },
            "created": "2021-03-01T09:00:00.000+0000",
            "status": { "name": "Done" },
            "description": "line one\r\nline two",
            "comment": { "comments": [{ "created": "2021-03-02T12:00:00.000+0000" }] }
        },
        "changelog": { "histories": [
            { "created": "2021-03-02T09:00:00.000+0000",
              "items": [{ "field": "status", "fromString": "Open", "toString": "Todo" }] },
            { "created": "2021-03-03T09:00:00.000+0000",
              "items": [{ "field": "status", "fromString": "Todo", "toString": "Done" }] }
        ] }
    })
}

fn open_epic(key: &str) -> serde_json::Value {
    json!({
        "key": key,
        "fields": {
            "issuetype": { "name": "Epic" },
            "created": "2021-03-01T09:00:00.000+0000",
            "status": { "name": "Open" }
        }
    })
}

#[test]
fn report_empty_directory() {
    let dir = export_dir();
    tally()
        .arg("report")
        .arg("-p")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Issue distribution by status (overall)"));
}

#[test]
fn report_missing_directory_fails() {
    let dir = export_dir();
    tally()
        .arg("report")
        .arg("-p")
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn report_prints_all_sections() {
    let dir = export_dir();
    write_issue(&dir, "a.json", task_through_todo("PROJ-1"));
    write_issue(&dir, "b.json", open_epic("PROJ-2"));

    tally()
        .arg("report")
        .arg("-p")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Epic (1)"))
        .stdout(predicate::str::contains("Task (1)"))
        .stdout(predicate::str::contains("Average description size"))
        .stdout(predicate::str::contains("- Open: 1"))
        .stdout(predicate::str::contains("- Done: 1"))
        .stdout(predicate::str::contains("Number of updates in status"))
        .stdout(predicate::str::contains("+ Comments"))
        .stdout(predicate::str::contains("Average time spent in status"))
        .stdout(predicate::str::contains(" - Todo: 1d"));
}

#[test]
fn report_skips_broken_files_quietly() {
    let dir = export_dir();
    write_issue(&dir, "good.json", task_through_todo("PROJ-1"));
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    tally()
        .arg("report")
        .arg("-p")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Task (1)"))
        .stdout(predicate::str::contains("Skipped files").not());
}

#[test]
fn report_show_skipped_lists_failures() {
    let dir = export_dir();
    write_issue(&dir, "good.json", task_through_todo("PROJ-1"));
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    tally()
        .arg("report")
        .arg("-p")
        .arg(dir.path())
        .arg("--show-skipped")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped files"))
        .stdout(predicate::str::contains("broken.json"));
}

#[test]
fn report_unknown_type_fails_loud() {
    let dir = export_dir();
    let mut stray = open_epic("PROJ-9");
    stray["fields"]["issuetype"]["name"] = json!("Saga");
    write_issue(&dir, "stray.json", stray);

    tally()
        .arg("report")
        .arg("-p")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown issue type: 'Saga'"));
}

#[test]
fn report_json_output() {
    let dir = export_dir();
    write_issue(&dir, "a.json", task_through_todo("PROJ-1"));

    let output = tally()
        .arg("report")
        .arg("-p")
        .arg(dir.path())
        .arg("-o")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["loaded"], 1);
    assert_eq!(value["body_sizes"][0]["issue_type"], "Task");
    assert_eq!(value["status_distribution"][0]["status"], "Done");
    assert_eq!(value["activity"]["comments"]["Todo"], 1);
    assert_eq!(value["time_in_status"][0]["issue_type"], "Task");
}

#[test]
fn completion_generates_script() {
    tally()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("tally"));
}
