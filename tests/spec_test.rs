//! Integration tests for `pybundle spec`
//!
//! - Renders the packaging spec from the manifest
//! - Embeds the icon only when the file exists
//! - Writes to a file with --output

mod common;

use common::TestProject;
use std::process::Command;

const MANIFEST: &str = r#"
[app]
name = "multiplecam"
entry = "multiplecam.py"
icon = "camera.ico"

[bundle]
hidden_imports = ["socketio", "engineio.async_drivers.threading", "vlc"]

[[bundle.binaries]]
src = "libvlc.dll"

[[bundle.binaries]]
src = "libvlccore.dll"

[[bundle.datas]]
src = "cameras.json"
dest = "."

[[bundle.datas]]
src = "plugins"
dest = "plugins"
"#;

fn run_spec(project: &TestProject, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pybundle"));
    cmd.current_dir(project.path());
    cmd.arg("spec");
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute pybundle spec")
}

#[test]
fn test_spec_renders_declared_inputs() {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);

    let output = run_spec(&project, &[]);

    assert!(
        output.status.success(),
        "spec should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("multiplecam.py"));
    assert!(stdout.contains("libvlc.dll"));
    assert!(stdout.contains("libvlccore.dll"));
    assert!(stdout.contains("cameras.json"));
    assert!(stdout.contains("'socketio'"));
    assert!(stdout.contains("'engineio.async_drivers.threading'"));
    assert!(stdout.contains("name='multiplecam'"));
    assert!(stdout.contains("console=False"));
}

#[test]
fn test_spec_missing_icon_warns_on_stderr_only() {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);

    let output = run_spec(&project, &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains("icon="), "missing icon must be omitted");
    assert!(stderr.contains("camera.ico"), "warning goes to stderr");
}

#[test]
fn test_spec_embeds_existing_icon() {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);
    project.create_file("camera.ico", "ico bytes");

    let output = run_spec(&project, &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("icon="));
}

#[test]
fn test_spec_output_writes_file() {
    let project = TestProject::new();
    project.write_manifest(MANIFEST);

    let output = run_spec(&project, &["--output", "rendered.spec"]);

    assert!(output.status.success());
    assert!(project.file_exists("rendered.spec"));
    let content = project.read_file("rendered.spec");
    assert!(content.contains("Analysis"));
    assert!(content.contains("'vlc'"));
}

#[test]
fn test_spec_without_manifest_fails() {
    let project = TestProject::new();

    let output = run_spec(&project, &[]);

    assert!(!output.status.success());
}
