//! Integration tests for the `slo` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the free, rank,
//! suggest, plan and watch subcommands through the actual binary, with a fixed
//! `--now` so every expected instant is known.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Monday 2026-03-16, 08:00 UTC.
const NOW: &str = "2026-03-16T08:00:00Z";

/// Helper: path to the state.json fixture.
fn state_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/state.json")
}

/// Helper: path to the config.json fixture.
fn config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.json")
}

/// Helper: read the state.json fixture as a string.
fn state_json() -> String {
    std::fs::read_to_string(state_path()).expect("state.json fixture must exist")
}

/// Helper: `slo --state <fixture> --now <NOW>` ready for more args.
fn slo() -> Command {
    let mut cmd = Command::cargo_bin("slo").unwrap();
    cmd.args(["--state", state_path(), "--now", NOW]);
    cmd
}

/// Helper: run a successful command and parse its stdout as JSON.
fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// free
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_merges_overlapping_classes() {
    let out = run_json(slo().arg("free"));

    let busy = out["busy"].as_array().unwrap();
    assert_eq!(busy.len(), 2, "Mon 09:00-12:00 and Wed 13:00-16:00: {busy:?}");
    assert_eq!(busy[0]["start"], "2026-03-16T09:00:00Z");
    assert_eq!(busy[0]["end"], "2026-03-16T12:00:00Z");
    assert_eq!(busy[1]["start"], "2026-03-18T13:00:00Z");
    assert_eq!(busy[1]["end"], "2026-03-18T16:00:00Z");
}

#[test]
fn free_reports_slots_and_total_hours() {
    let out = run_json(slo().arg("free"));

    let free = out["free"].as_array().unwrap();
    assert_eq!(free[0]["start"], NOW);
    assert_eq!(free[0]["end"], "2026-03-16T09:00:00Z");
    assert_eq!(free.last().unwrap()["end"], "2026-03-23T08:00:00Z");
    assert_eq!(out["window_end"], "2026-03-23T08:00:00Z");

    let hours = out["total_free_hours"].as_f64().unwrap();
    assert!((hours - 162.0).abs() < 1e-9, "got {hours}");
}

#[test]
fn free_lists_malformed_commitments() {
    let out = run_json(slo().arg("free"));

    let degraded = out["degraded"].as_array().unwrap();
    assert!(
        degraded
            .iter()
            .any(|d| d["commitment_id"] == "c_4" && d["reason"] == "malformed_time"),
        "seminar with start 'noon' should be reported: {degraded:?}"
    );
}

#[test]
fn free_reads_state_from_stdin() {
    let output = Command::cargo_bin("slo")
        .unwrap()
        .args(["--now", NOW, "free"])
        .write_stdin(state_json())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let out: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(out["busy"].as_array().unwrap().len(), 2);
}

#[test]
fn free_with_timezone_moves_class_times() {
    // 15:00 in Bangkok: Monday's classes are over, Wednesday 13:00 local is 06:00 UTC.
    let out = run_json(slo().args(["--timezone", "Asia/Bangkok", "free"]));

    let busy = out["busy"].as_array().unwrap();
    assert_eq!(busy[0]["start"], "2026-03-18T06:00:00Z");
    assert_eq!(busy[0]["end"], "2026-03-18T09:00:00Z");
}

#[test]
fn free_with_config_file() {
    let out = run_json(slo().args(["--config", config_path(), "free"]));

    assert_eq!(out["window_end"], "2026-03-19T08:00:00Z");
    let busy = out["busy"].as_array().unwrap();
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0]["start"], "2026-03-18T06:00:00Z");
}

#[test]
fn horizon_flag_overrides_config_file() {
    let out = run_json(slo().args(["--config", config_path(), "--horizon-days", "1", "free"]));

    assert_eq!(out["window_end"], "2026-03-17T08:00:00Z");
}

// ─────────────────────────────────────────────────────────────────────────────
// rank
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn rank_orders_by_urgency() {
    let out = run_json(slo().arg("rank"));

    let ids: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["t_2", "t_4", "t_1", "t_3"]);

    let top = out[0]["priority"].as_f64().unwrap();
    assert!(top > 0.75 && top < 0.76, "3h over 4h plus a small age term, got {top}");
}

// ─────────────────────────────────────────────────────────────────────────────
// suggest
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn suggest_contiguous_block() {
    let out = run_json(slo().args(["suggest", "--task", "t_1"]));

    assert_eq!(out["task_id"], "t_1");
    assert_eq!(out["evaluated_at"], NOW);
    let suggestion = &out["suggestion"];
    assert_eq!(suggestion["kind"], "contiguous");
    assert_eq!(suggestion["start"], "2026-03-16T12:00:00Z");
    assert_eq!(suggestion["end"], "2026-03-16T14:00:00Z");
}

#[test]
fn suggest_split_across_classes() {
    let out = run_json(slo().args(["suggest", "-t", "t_4"]));

    let suggestion = &out["suggestion"];
    assert_eq!(suggestion["kind"], "split");
    let parts = suggestion["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["start"], NOW);
    assert_eq!(parts[0]["end"], "2026-03-16T09:00:00Z");
    assert_eq!(parts[1]["start"], "2026-03-16T12:00:00Z");
    assert_eq!(parts[1]["end"], "2026-03-16T12:30:00Z");
}

#[test]
fn suggest_infeasible_task() {
    let out = run_json(slo().args(["suggest", "--task", "t_2"]));

    assert_eq!(out["suggestion"]["kind"], "infeasible");
}

#[test]
fn suggest_unknown_task_fails() {
    slo()
        .args(["suggest", "--task", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown task id"));
}

// ─────────────────────────────────────────────────────────────────────────────
// plan
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn plan_covers_every_task_in_priority_order() {
    let out = run_json(slo().arg("plan"));

    let entries = out.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["task"]["id"], "t_2");
    assert_eq!(entries[0]["suggestion"]["kind"], "infeasible");
    assert_eq!(entries[2]["task"]["id"], "t_1");
    assert_eq!(entries[2]["suggestion"]["kind"], "contiguous");
}

#[test]
fn plan_suggestions_are_independent() {
    // t_1 and t_3 both want the noon slot; neither reserves it.
    let out = run_json(slo().arg("plan"));

    let entries = out.as_array().unwrap();
    assert_eq!(entries[2]["suggestion"]["start"], "2026-03-16T12:00:00Z");
    assert_eq!(entries[3]["task"]["id"], "t_3");
    assert_eq!(entries[3]["suggestion"]["start"], "2026-03-16T12:00:00Z");
}

#[test]
fn plan_with_no_tasks_is_empty() {
    Command::cargo_bin("slo")
        .unwrap()
        .args(["--now", NOW, "plan"])
        .write_stdin(r#"{"classes":[],"tasks":[]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

// ─────────────────────────────────────────────────────────────────────────────
// watch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn watch_prints_first_evaluation_immediately() {
    let output = slo()
        .args(["watch", "--task", "t_1", "--count", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1, "one compact JSON line per evaluation");

    let line: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(line["task_id"], "t_1");
    assert_eq!(line["suggestion"]["kind"], "contiguous");
}

#[test]
fn watch_unknown_task_fails() {
    slo()
        .args(["watch", "--task", "nope", "--count", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown task id"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_timezone_fails() {
    slo()
        .args(["--timezone", "Mars/Olympus", "free"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid planner configuration"));
}

#[test]
fn zero_horizon_fails() {
    slo()
        .args(["--horizon-days", "0", "free"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid planner configuration"));
}

#[test]
fn invalid_now_fails() {
    Command::cargo_bin("slo")
        .unwrap()
        .args(["--state", state_path(), "--now", "next tuesday", "free"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --now value"));
}

#[test]
fn missing_state_file_fails() {
    Command::cargo_bin("slo")
        .unwrap()
        .args(["--state", "/nonexistent/state.json", "--now", NOW, "free"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read state file"));
}

#[test]
fn malformed_state_fails() {
    Command::cargo_bin("slo")
        .unwrap()
        .args(["--now", NOW, "rank"])
        .write_stdin("not json at all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse state"));
}

#[test]
fn no_subcommand_shows_help() {
    Command::cargo_bin("slo")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
