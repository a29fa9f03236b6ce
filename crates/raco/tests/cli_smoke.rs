//! CLI smoke tests for the offline commands.
//!
//! These drive the `raco` binary directly for the commands that never
//! touch the network (`plan`, `completions`, `config`).

use std::process::{Command, Output};

use serde_json::Value;

fn raco(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_raco"))
        .args(args)
        .env("RACO_CONFIG", "/tmp/raco-smoke-nonexistent/config.toml")
        .output()
        .expect("failed to run raco binary")
}

#[test]
fn test_plan_json_splits_server_and_client() {
    let output = raco(&[
        "--json",
        "plan",
        "genre:eq:techno AND artists:has:kobosil",
    ]);
    assert!(output.status.success());

    let plan: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["server"]["genre"], serde_json::json!({"eq": "techno"}));
    assert_eq!(plan["client"][0]["field"], "artists");
    assert_eq!(plan["client"][0]["operator"], "has");
    assert_eq!(plan["noop"], false);
}

#[test]
fn test_plan_reports_diagnostics_without_failing() {
    let output = raco(&["--json", "plan", "genre:betwen:10,20"]);
    assert!(output.status.success());

    let plan: Value = serde_json::from_slice(&output.stdout).unwrap();
    let diagnostics = plan["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].as_str().unwrap().contains("between"));
}

#[test]
fn test_completions_emit_bash_script() {
    let output = raco(&["completions", "bash"]);
    assert!(output.status.success());
    let script = String::from_utf8_lossy(&output.stdout);
    assert!(script.contains("raco"));
}

#[test]
fn test_config_json_reports_missing_file() {
    let output = raco(&["--json", "config"]);
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["exists"], false);
}

#[test]
fn test_events_rejects_bad_date() {
    let output = raco(&["--json", "events", "--from", "next friday"]);
    assert!(!output.status.success());

    let error: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"]["code"], "INPUT_ERROR");
}
