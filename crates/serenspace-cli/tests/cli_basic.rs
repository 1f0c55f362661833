//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. All runs
//! use the dev data directory so they never touch real user data.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "serenspace-cli", "--quiet", "--"])
        .args(args)
        .env("SERENSPACE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_breathe_list() {
    let (stdout, _, code) = run_cli(&["breathe", "list"]);
    assert_eq!(code, 0, "breathe list failed");
    assert!(stdout.contains("Box Breathing"));
    assert!(stdout.contains("4-7-8 Breathing"));
    assert!(stdout.contains("Calming Breath"));
}

#[test]
fn test_breathe_session_lifecycle() {
    let (stdout, stderr, code) = run_cli(&["breathe", "start", "--profile", "box", "--cycles", "3"]);
    assert_eq!(code, 0, "breathe start failed: {stderr}");
    assert!(stdout.contains("SessionStarted"));

    let (stdout, _, code) = run_cli(&["breathe", "status"]);
    assert_eq!(code, 0, "breathe status failed");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["status"], "running");
    assert_eq!(snapshot["phase"], "inhale");
    assert_eq!(snapshot["target_cycles"], 3);

    let (_, _, code) = run_cli(&["breathe", "tick"]);
    assert_eq!(code, 0, "breathe tick failed");

    let (stdout, _, code) = run_cli(&["breathe", "pause"]);
    assert_eq!(code, 0, "breathe pause failed");
    assert!(stdout.contains("SessionPaused"));

    let (stdout, _, code) = run_cli(&["breathe", "resume"]);
    assert_eq!(code, 0, "breathe resume failed");
    assert!(stdout.contains("SessionResumed"));

    let (stdout, _, code) = run_cli(&["breathe", "reset"]);
    assert_eq!(code, 0, "breathe reset failed");
    assert!(stdout.contains("SessionReset"));
}

#[test]
fn test_breathe_unknown_profile_fails() {
    let (_, stderr, code) = run_cli(&["breathe", "start", "--profile", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown profile"));
}

#[test]
fn test_streak_show() {
    let (stdout, _, code) = run_cli(&["streak", "show"]);
    assert_eq!(code, 0, "streak show failed");
    let streaks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(streaks.get("journal").is_some());
    assert!(streaks.get("self_care").is_some());
}

#[test]
fn test_streak_record_and_replay() {
    let (stdout, stderr, code) = run_cli(&["streak", "record", "--kind", "journal"]);
    assert_eq!(code, 0, "streak record failed: {stderr}");
    assert!(stdout.contains("StreakUpdated"));

    let (stdout, _, code) = run_cli(&["streak", "replay", "--kind", "journal"]);
    assert_eq!(code, 0, "streak replay failed");
    let replay: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(replay["derived_streak"].as_u64().unwrap() >= 1);
}

#[test]
fn test_config_list_and_get() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(config.get("session").is_some());

    let (stdout, _, code) = run_cli(&["config", "get", "session.default_profile"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());
}
