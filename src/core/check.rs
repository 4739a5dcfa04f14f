//! Bundle input verification logic
//!
//! Verifies that every input the manifest declares actually exists on
//! disk before a build is attempted, and that declared checksums match.
//! Nothing here mutates the project.

use std::path::Path;

use walkdir::WalkDir;

use crate::core::manifest::{FileEntry, Manifest};
use crate::error::PybundleError;
use crate::infra::filesystem::sha256_file;

/// Result of the check operation
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Declared inputs that do not exist on disk
    pub missing_inputs: Vec<String>,
    /// Inputs whose checksum did not match the declaration
    pub checksum_failures: Vec<String>,
    /// Non-fatal findings
    pub warnings: Vec<String>,
    /// Number of files under declared data entries
    pub data_files: usize,
    /// Total bytes under declared data entries
    pub data_bytes: u64,
}

impl CheckReport {
    /// Whether the project is ready to build
    pub fn is_ok(&self) -> bool {
        self.missing_inputs.is_empty() && self.checksum_failures.is_empty()
    }
}

/// Verify every declared bundle input against the filesystem
pub fn check(project_dir: &Path, manifest: &Manifest) -> Result<CheckReport, PybundleError> {
    let mut report = CheckReport::default();

    let entry = project_dir.join(&manifest.app.entry);
    if !entry.is_file() {
        report
            .missing_inputs
            .push(format!("entry script '{}'", manifest.app.entry));
    }

    for binary in &manifest.bundle.binaries {
        check_file_entry(project_dir, binary, "binary", &mut report)?;
    }
    for data in &manifest.bundle.datas {
        check_file_entry(project_dir, data, "data", &mut report)?;
    }

    for hook in &manifest.bundle.runtime_hooks {
        if !project_dir.join(hook).is_file() {
            report.missing_inputs.push(format!("runtime hook '{hook}'"));
        }
    }

    if let Some(icon) = &manifest.app.icon {
        if !project_dir.join(icon).is_file() {
            report.warnings.push(format!(
                "icon '{icon}' not found; the executable will be built without one"
            ));
        }
    }

    Ok(report)
}

fn check_file_entry(
    project_dir: &Path,
    entry: &FileEntry,
    kind: &str,
    report: &mut CheckReport,
) -> Result<(), PybundleError> {
    let path = project_dir.join(&entry.src);

    if path.is_file() {
        report.data_files += 1;
        report.data_bytes += path.metadata().map(|m| m.len()).unwrap_or(0);

        if let Some(expected) = &entry.sha256 {
            let actual = sha256_file(&path)?;
            if !actual.eq_ignore_ascii_case(expected) {
                report.checksum_failures.push(format!(
                    "{kind} '{}': expected {expected}, got {actual}",
                    entry.src
                ));
            }
        }
    } else if path.is_dir() {
        if entry.sha256.is_some() {
            report.warnings.push(format!(
                "checksum on {kind} '{}' ignored: checksums apply to files, not directories",
                entry.src
            ));
        }
        for file in WalkDir::new(&path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            report.data_files += 1;
            report.data_bytes += file.metadata().map(|m| m.len()).unwrap_or(0);
        }
    } else {
        report
            .missing_inputs
            .push(format!("{kind} '{}'", entry.src));
    }

    Ok(())
}
