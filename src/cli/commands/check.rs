//! CLI implementation for `pybundle check`
//!
//! Verifies declared bundle inputs without building.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::output::{is_json, print_detail, print_success, print_warning, status};
use crate::core::check;
use crate::core::manifest::Manifest;

/// Execute the check command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = Manifest::load(project_dir)?;

    tracing::info!("Checking bundle inputs for '{}'", manifest.app.name);

    let report = check::check(project_dir, &manifest)?;

    if is_json() {
        let json_result = serde_json::json!({
            "status": if report.is_ok() { "ok" } else { "error" },
            "missing_inputs": report.missing_inputs,
            "checksum_failures": report.checksum_failures,
            "warnings": report.warnings,
            "data_files": report.data_files,
            "data_bytes": report.data_bytes,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json_result).unwrap_or_default()
        );
        if !report.is_ok() {
            bail!("Bundle inputs are incomplete");
        }
        return Ok(());
    }

    if !report.missing_inputs.is_empty() {
        eprintln!("{} Missing inputs:", status::ERROR);
        for missing in &report.missing_inputs {
            eprintln!("  - {missing}");
        }
    }

    if !report.checksum_failures.is_empty() {
        eprintln!("{} Checksum mismatches:", status::ERROR);
        for failure in &report.checksum_failures {
            eprintln!("  - {failure}");
        }
    }

    for warning in &report.warnings {
        print_warning(warning);
    }

    if !report.is_ok() {
        bail!(
            "{} input problem(s) found; fix {} before building",
            report.missing_inputs.len() + report.checksum_failures.len(),
            crate::config::defaults::MANIFEST_FILE
        );
    }

    print_success(&format!(
        "All bundle inputs present for '{}'",
        manifest.app.name
    ));
    print_detail(&format!(
        "{} file(s), {} byte(s) of declared binaries and data",
        report.data_files, report.data_bytes
    ));

    Ok(())
}
