//! Python interpreter processes
//!
//! Locates the interpreter and runs every external process the build
//! pipeline needs: import probes, pip installs, and the packaging tool
//! itself. All invocations block until the child exits.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use regex::Regex;

use crate::config::defaults::{INTERPRETER_CANDIDATES, PACKAGER_MODULE};
use crate::error::{BundleError, PreflightError};

/// A resolved Python interpreter
#[derive(Debug, Clone)]
pub struct Interpreter {
    path: PathBuf,
}

impl Interpreter {
    /// Discover an interpreter on the search path
    ///
    /// Probes the well-known interpreter names in order and returns the
    /// first hit. Failing to resolve one is a fatal precondition violation.
    pub fn discover() -> Result<Self, PreflightError> {
        for candidate in INTERPRETER_CANDIDATES {
            if let Ok(path) = which::which(candidate) {
                tracing::debug!("Resolved interpreter '{candidate}' to {}", path.display());
                return Ok(Self { path });
            }
        }
        Err(PreflightError::InterpreterNotFound {
            candidates: INTERPRETER_CANDIDATES
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        })
    }

    /// Use an explicitly configured interpreter
    ///
    /// Accepts a bare command name (resolved on the search path) or a
    /// concrete path, which must exist and be executable.
    pub fn at(spec: &str) -> Result<Self, PreflightError> {
        match which::which(spec) {
            Ok(path) => Ok(Self { path }),
            Err(_) => Err(PreflightError::InterpreterMissing {
                path: PathBuf::from(spec),
            }),
        }
    }

    /// Path of the resolved interpreter binary
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Interpreter version, if it can be determined
    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.path).arg("--version").output().ok()?;
        if !output.status.success() {
            return None;
        }
        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        extract_version(&combined)
    }

    /// Whether a module is importable by this interpreter
    pub fn module_available(&self, module: &str) -> Result<bool, PreflightError> {
        let output = Command::new(&self.path)
            .arg("-c")
            .arg(format!("import {module}"))
            .output()
            .map_err(|e| PreflightError::InterpreterFailed {
                path: self.path.clone(),
                error: e.to_string(),
            })?;
        Ok(output.status.success())
    }

    /// Version reported by `python -m <module> --version`, if any
    pub fn module_version(&self, module: &str) -> Option<String> {
        let output = Command::new(&self.path)
            .arg("-m")
            .arg(module)
            .arg("--version")
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        extract_version(&combined)
    }

    /// Install a package with this interpreter's pip
    ///
    /// One-shot: a failed install is terminal, never retried.
    pub fn pip_install(&self, package: &str) -> Result<(), PreflightError> {
        tracing::info!("Installing '{package}' via pip");
        let output = Command::new(&self.path)
            .arg("-m")
            .arg("pip")
            .arg("install")
            .arg(package)
            .output()
            .map_err(|e| PreflightError::InterpreterFailed {
                path: self.path.clone(),
                error: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(PreflightError::InstallFailed {
                package: package.to_string(),
                detail: tail_lines(&String::from_utf8_lossy(&output.stderr), 5),
            })
        }
    }

    /// Run the packaging tool against a rendered spec file
    ///
    /// Output is captured, not streamed; the caller persists it to the
    /// build log and inspects the exit status.
    pub fn run_packager(
        &self,
        spec_path: &Path,
        project_dir: &Path,
        extra_args: &[String],
    ) -> Result<Output, BundleError> {
        let mut cmd = Command::new(&self.path);
        cmd.arg("-m")
            .arg(PACKAGER_MODULE)
            .arg("--noconfirm")
            .args(extra_args)
            .arg(spec_path)
            .current_dir(project_dir);

        tracing::debug!("Invoking packager: {cmd:?}");
        cmd.output().map_err(|e| BundleError::PackagerSpawn {
            error: e.to_string(),
        })
    }
}

/// Extract a version string like "1.2.3" or "v1.2.3-beta" from tool output
pub fn extract_version(output: &str) -> Option<String> {
    let version_regex = Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Last `n` non-empty lines of process output, joined
fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
