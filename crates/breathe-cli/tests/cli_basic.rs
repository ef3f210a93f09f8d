//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Config state
//! is redirected into the cargo tmp dir so runs never touch a real home.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "-p", "breathe-cli", "--"])
        .args(args)
        .env("BREATHE_CONFIG_DIR", env!("CARGO_TARGET_TMPDIR"))
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_technique_list_shows_all_six() {
    let (stdout, _, code) = run_cli(&["technique", "list"]);
    assert_eq!(code, 0, "Technique list failed");
    for id in [
        "box",
        "four-seven-eight",
        "diaphragmatic",
        "resonance",
        "wim-hof",
        "buteyko",
    ] {
        assert!(stdout.contains(id), "missing {id} in:\n{stdout}");
    }
}

#[test]
fn test_technique_list_json_parses() {
    let (stdout, _, code) = run_cli(&["technique", "list", "--json"]);
    assert_eq!(code, 0, "Technique list JSON failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON");
    let rows = parsed.as_array().expect("expected an array");
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().any(|r| r["id"] == "box"));
}

#[test]
fn test_technique_show_box() {
    let (stdout, _, code) = run_cli(&["technique", "show", "box"]);
    assert_eq!(code, 0, "Technique show failed");
    assert!(stdout.contains("Box Breathing"));
    assert!(stdout.contains("4-4-4-4"));
}

#[test]
fn test_technique_show_unknown_fails() {
    let (_, stderr, code) = run_cli(&["technique", "show", "no-such-technique"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown technique"), "stderr:\n{stderr}");
}

#[test]
fn test_start_rejects_out_of_range_cycles() {
    let (_, stderr, code) = run_cli(&["start", "box", "--cycles", "99", "--text"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("out of range"), "stderr:\n{stderr}");
}

#[test]
fn test_start_unknown_technique_fails() {
    let (_, stderr, code) = run_cli(&["start", "no-such-technique", "--text"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown technique"), "stderr:\n{stderr}");
}

#[test]
fn test_config_get_set_round_trip() {
    let (stdout, _, code) = run_cli(&["config", "get", "language"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "en");

    let (stdout, _, code) = run_cli(&["config", "set", "display.fps", "60"]);
    assert_eq!(code, 0, "Config set failed");
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(&["config", "get", "display.fps"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "60");
}

#[test]
fn test_config_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"), "stderr:\n{stderr}");
}

#[test]
fn test_completions_bash_generates() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("breathe"));
}
