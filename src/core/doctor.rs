//! Doctor command logic
//!
//! Checks system dependencies and reports issues with suggestions.

use std::path::Path;

use crate::config::defaults::{MANIFEST_FILE, PACKAGER_MODULE};
use crate::infra::python::{extract_version, Interpreter};

/// Result of a single dependency check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the dependency being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version if available
    pub version: Option<String>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
    /// Whether this is a required or optional dependency
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, version: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            version,
            error: None,
            suggestion: None,
            required,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            version: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
            required,
        }
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Configuration issues found
    pub config_issues: Vec<String>,
}

impl DoctorReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check result
    pub fn add_check(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Add a configuration issue
    pub fn add_config_issue(&mut self, issue: String) {
        self.config_issues.push(issue);
    }

    /// Check if all required checks passed
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Check if all checks passed (including optional)
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed) && self.config_issues.is_empty()
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get all failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .collect()
    }
}

/// Check Python interpreter availability
pub fn check_interpreter() -> (CheckResult, Option<Interpreter>) {
    match Interpreter::discover() {
        Ok(interpreter) => {
            let version = interpreter.version();
            (
                CheckResult::pass("Python interpreter", version, true),
                Some(interpreter),
            )
        }
        Err(e) => (
            CheckResult::fail(
                "Python interpreter",
                &e.to_string(),
                Some("Install Python from https://www.python.org/downloads/ and ensure it is on PATH"),
                true,
            ),
            None,
        ),
    }
}

/// Check pip availability for an interpreter
pub fn check_pip(interpreter: &Interpreter) -> CheckResult {
    match interpreter.module_version("pip") {
        Some(version) => CheckResult::pass("pip", Some(version), true),
        None => CheckResult::fail(
            "pip",
            "pip is not available for the resolved interpreter",
            Some("Install pip with 'python -m ensurepip --upgrade'"),
            true,
        ),
    }
}

/// Check packager availability for an interpreter
///
/// Optional: the build installs it automatically when missing.
pub fn check_packager(interpreter: &Interpreter) -> CheckResult {
    match interpreter.module_version(PACKAGER_MODULE) {
        Some(version) => CheckResult::pass("PyInstaller", Some(version), false),
        None => CheckResult::fail(
            "PyInstaller",
            "PyInstaller is not importable",
            Some("No action needed: 'pybundle build' installs it automatically"),
            false,
        ),
    }
}

/// Check UPX availability (optional, used by the packager for compression)
pub fn check_upx() -> CheckResult {
    let probe = std::process::Command::new("upx").arg("--version").output();
    let version = probe.ok().and_then(|output| {
        if output.status.success() {
            let combined = format!(
                "{}{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
            extract_version(&combined)
        } else {
            None
        }
    });

    match version {
        Some(v) => CheckResult::pass("UPX (compression)", Some(v), false),
        None => CheckResult::fail(
            "UPX (compression)",
            "UPX not found in PATH",
            Some("Install UPX for smaller executables: https://upx.github.io/ (optional)"),
            false,
        ),
    }
}

/// Check if project configuration is valid
pub fn check_project_config(project_dir: &Path) -> Vec<String> {
    let mut issues = Vec::new();
    let manifest_path = project_dir.join(MANIFEST_FILE);

    if manifest_path.exists() {
        match std::fs::read_to_string(&manifest_path) {
            Ok(content) => {
                if let Err(e) = crate::core::manifest::Manifest::from_toml(&content) {
                    issues.push(format!("Invalid manifest: {e}"));
                }
            }
            Err(e) => {
                issues.push(format!("Cannot read manifest: {e}"));
            }
        }
    }

    issues
}

/// Run all doctor checks
pub fn run_doctor(project_dir: Option<&Path>) -> DoctorReport {
    let mut report = DoctorReport::new();

    let (interpreter_check, interpreter) = check_interpreter();
    report.add_check(interpreter_check);

    if let Some(interpreter) = &interpreter {
        report.add_check(check_pip(interpreter));
        report.add_check(check_packager(interpreter));
    }

    report.add_check(check_upx());

    if let Some(dir) = project_dir {
        for issue in check_project_config(dir) {
            report.add_config_issue(issue);
        }
    }

    report
}
