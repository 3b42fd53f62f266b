//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "goaltrack-cli", "--"])
        .args(args)
        .env("GOALTRACK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Category unique to this test process, so reruns don't collide.
fn unique_category(prefix: &str) -> String {
    format!("{prefix}-{}", std::process::id())
}

#[test]
fn test_task_create_and_list() {
    let (stdout, _, code) = run_cli(&["task", "create", "CLI test task"]);
    assert_eq!(code, 0, "task create failed");
    assert!(stdout.contains("Task created:"));

    let (stdout, _, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0, "task list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("task list should print JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_goal_create_and_streak_complete() {
    let category = unique_category("dsa-e2e");

    let (stdout, _, code) = run_cli(&["goal", "create", &category, "--daily-target", "2"]);
    assert_eq!(code, 0, "goal create failed");
    assert!(stdout.contains("Goal created:"));

    // 2025-06-04 is a Wednesday (weekday index 2).
    let (stdout, _, code) = run_cli(&[
        "streak", "complete", &category, "--today", "2025-06-04",
    ]);
    assert_eq!(code, 0, "streak complete failed");
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["weekly_streak"], 1);
    assert_eq!(parsed["current_week_days_completed"][0], 2);

    // Same day again: no-op, identical response.
    let (stdout, _, code) = run_cli(&[
        "streak", "complete", &category, "--today", "2025-06-04",
    ]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["weekly_streak"], 1);
}

#[test]
fn test_streak_reconcile() {
    let (stdout, _, code) = run_cli(&["streak", "reconcile"]);
    assert_eq!(code, 0, "streak reconcile failed");
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["status"], "streaks checked and updated");
}

#[test]
fn test_streak_complete_unknown_goal_fails() {
    let (_, stderr, code) = run_cli(&["streak", "complete", "no-such-goal-xyz"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Goal not found"));
}

#[test]
fn test_config_get_default() {
    let (stdout, _, code) = run_cli(&["config", "get", "goals.default_daily_target"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());
}
