//! Build command implementation
//!
//! Implements `pybundle build`: preflight the interpreter and packager,
//! verify declared inputs, clear stale build output, render the spec,
//! invoke the packaging tool, and report the result.
//!
//! Ordering invariant: nothing is deleted until every precondition has
//! passed, and the packager is never invoked after a failed step.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::output::{
    create_spinner, is_json, is_quiet, print_detail, print_info, print_success, print_warning,
};
use crate::config::defaults::{BUILD_DIR, FAILURE_LOG_TAIL, PACKAGER_LOG};
use crate::core::manifest::Manifest;
use crate::core::preflight::run_preflight;
use crate::core::{check, clean, spec};
use crate::error::BundleError;
use crate::infra::filesystem;

/// Execute the build command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = Manifest::load(project_dir)?;

    tracing::info!("Bundling '{}'", manifest.app.name);

    // Preconditions: interpreter and packager. Fails before anything
    // on disk is touched.
    let preflight = run_preflight(&manifest.tool)?;
    print_info(&format!(
        "Using {}{}",
        preflight.interpreter.path().display(),
        preflight
            .interpreter_version
            .as_ref()
            .map(|v| format!(" (Python {v})"))
            .unwrap_or_default()
    ));
    if preflight.installed {
        print_detail("Installed PyInstaller via pip");
    }
    if let Some(version) = &preflight.packager_version {
        print_detail(&format!("PyInstaller {version}"));
    }

    // Declared inputs must exist before the stale output is destroyed.
    let report = check::check(project_dir, &manifest)?;
    for warning in &report.warnings {
        print_warning(warning);
    }
    if !report.is_ok() {
        for missing in &report.missing_inputs {
            eprintln!("  missing: {missing}");
        }
        for failure in &report.checksum_failures {
            eprintln!("  checksum: {failure}");
        }
        bail!("Bundle inputs are incomplete; run 'pybundle check' for details");
    }

    // Clean slate: remove stale build/ and dist/ unconditionally.
    let cleaned = clean::clean_project(project_dir)?;
    for dir in &cleaned.removed {
        print_detail(&format!("Removed stale {dir}/"));
    }

    // Render the spec build input into build/.
    let rendered = spec::render(&manifest, project_dir);
    for warning in &rendered.warnings {
        print_warning(warning);
    }
    let spec_path = project_dir.join(BUILD_DIR).join(spec::spec_filename(&manifest));
    filesystem::write_file(&spec_path, &rendered.content)?;
    tracing::debug!("Rendered spec to {}", spec_path.display());

    // Invoke the packaging tool, blocking until it exits.
    let spinner = if is_quiet() || is_json() {
        None
    } else {
        Some(create_spinner(&format!(
            "Running PyInstaller for '{}'...",
            manifest.app.name
        )))
    };

    let output = preflight
        .interpreter
        .run_packager(&spec_path, project_dir, &manifest.tool.extra_args)?;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    // Persist the captured packager output next to the spec.
    let log_path = project_dir.join(BUILD_DIR).join(PACKAGER_LOG);
    let log_content = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    if let Err(e) = filesystem::write_file(&log_path, &log_content) {
        tracing::warn!("Could not write packager log: {e}");
    }

    if !output.status.success() {
        if !is_quiet() {
            for line in tail(&log_content, FAILURE_LOG_TAIL) {
                eprintln!("  {line}");
            }
        }
        let status = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| format!("exit code {c}"));
        return Err(BundleError::PackagerFailed {
            status,
            log: log_path,
        }
        .into());
    }

    let executable = spec::output_executable(project_dir, &manifest.app.name);
    if !executable.exists() {
        print_warning(&format!(
            "Packager reported success but {} is missing",
            executable.display()
        ));
    }
    print_success(&format!(
        "Bundled '{}' -> {}",
        manifest.app.name,
        executable.display()
    ));

    Ok(())
}

/// Last `n` lines of text, for error reporting
fn tail(text: &str, n: usize) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].to_vec()
}
