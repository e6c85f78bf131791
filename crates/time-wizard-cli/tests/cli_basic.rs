//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with `TIME_WIZARD_HOME` pointing at a
//! temporary directory and verify outputs and files.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_time-wizard"))
        .env("TIME_WIZARD_HOME", home)
        .env_remove("TIME_WIZARD_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

#[test]
fn test_task_lifecycle() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(
        home.path(),
        &["task", "add", "Write report", "--board", "Doing", "--remind-on", "daily 09:00"],
    );
    assert!(out.contains("Task created: 1"));

    let out = run_ok(home.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(tasks[0]["name"], "Write report");
    assert_eq!(tasks[0]["board_id"], 2);
    assert_eq!(tasks[0]["remind_for"], 1800);

    run_ok(home.path(), &["task", "edit", "1", "--remind-for", "60"]);
    let out = run_ok(home.path(), &["task", "list"]);
    assert!(out.contains("Write report"));
    assert!(out.contains("Doing"));
    assert!(out.contains("60"));

    run_ok(home.path(), &["task", "delete", "1"]);
    let out = run_ok(home.path(), &["task", "list", "--json"]);
    assert_eq!(out.trim(), "[]");
    assert!(home.path().join("kanban.json").exists());
}

#[test]
fn test_task_errors() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "delete", "7"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("doesn't exist"));

    let (_, stderr, code) = run_cli(home.path(), &["task", "add", "x", "--board", "Nowhere"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Nowhere"));
}

#[test]
fn test_boards_and_kanban_view() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(home.path(), &["board", "list"]);
    assert!(out.contains("To do"));
    assert!(out.contains("Scheduled"));

    let out = run_ok(home.path(), &["board", "add", "Someday"]);
    assert!(out.contains("Board created: 5"));
    run_ok(home.path(), &["board", "rename", "5", "Maybe"]);
    run_ok(home.path(), &["task", "add", "Learn piano", "--board", "Maybe"]);

    let out = run_ok(home.path(), &["kanban"]);
    assert!(out.contains("Maybe"));
    assert!(out.contains("1. Learn piano"));
    assert!(!out.contains("Doing"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(home.path(), &["config", "get", "timer.work_time"]).trim(), "1500");

    run_ok(home.path(), &["config", "set", "timer.work_time", "3000"]);
    assert_eq!(run_ok(home.path(), &["config", "get", "timer.work_time"]).trim(), "3000");
    assert!(home.path().join("config.toml").exists());

    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.rest_time", "0"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);

    run_ok(home.path(), &["config", "reset"]);
    assert_eq!(run_ok(home.path(), &["config", "get", "timer.work_time"]).trim(), "1500");
}

#[test]
fn test_resolve() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(home.path(), &["resolve", "2030-01-05", "06:07"]);
    assert_eq!(out.trim(), "2030-01-05 06:07:00");

    let out = run_ok(home.path(), &["resolve", "*-*-*", "12:00"]);
    assert!(out.trim().ends_with(" 12:00:00"));

    let (_, stderr, code) = run_cli(home.path(), &["resolve", "someday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unresolvable"));
}

#[test]
fn test_remind_lists_active_tasks() {
    let home = tempfile::tempdir().unwrap();
    // A window opening at midnight and lasting a full day is active all day
    // except at 00:00:00 exactly.
    run_ok(
        home.path(),
        &["task", "add", "All day", "--remind-on", "everyday 00:00", "--remind-for", "86400"],
    );
    run_ok(home.path(), &["task", "add", "Never", "--remind-on", "garbage"]);

    let out = run_ok(home.path(), &["remind", "--json"]);
    let active: serde_json::Value = serde_json::from_str(&out).unwrap();
    let names: Vec<_> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.iter().all(|n| n == "All day"));
    assert!(!names.iter().any(|n| n == "Never"));
}
