//! Integration tests for `pybundle doctor`
//!
//! Doctor runs against whatever the host provides, so assertions stay
//! tolerant of missing interpreters.

mod common;

use common::TestProject;
use std::process::Command;

fn run_doctor(project: &TestProject, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pybundle"));
    cmd.current_dir(project.path());
    cmd.arg("doctor");
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute pybundle doctor")
}

#[test]
fn test_doctor_reports_interpreter_check() {
    let project = TestProject::new();

    let output = run_doctor(&project, &[]);

    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(combined.contains("Python"), "doctor must mention Python: {combined}");
}

#[test]
fn test_doctor_json_is_machine_readable() {
    let project = TestProject::new();

    let output = run_doctor(&project, &["--json"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("doctor --json must emit valid JSON");
    assert!(parsed["checks"].is_array());
    assert!(parsed["total_count"].as_u64().unwrap() >= 1);
}

#[test]
fn test_doctor_flags_invalid_manifest() {
    let project = TestProject::new();
    project.write_manifest("not [ valid toml");

    let output = run_doctor(&project, &["--json"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("doctor --json must emit valid JSON");
    assert_eq!(
        parsed["config_issues"].as_array().unwrap().len(),
        1,
        "invalid manifest must surface as a configuration issue"
    );
}

#[test]
fn test_doctor_ignores_absent_manifest() {
    let project = TestProject::new();

    let output = run_doctor(&project, &["--json"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("doctor --json must emit valid JSON");
    assert!(parsed["config_issues"].as_array().unwrap().is_empty());
}
