//! Clean logic
//!
//! Removes the transient build output directories so every build starts
//! from a clean slate. The removal is destructive and takes no backup;
//! the packaging tool recreates both directories on the next build.

use std::path::Path;

use crate::config::defaults::{BUILD_DIR, DIST_DIR};
use crate::error::FilesystemError;

/// Directories to remove during clean
pub const CLEAN_DIRECTORIES: &[&str] = &[BUILD_DIR, DIST_DIR];

/// Result of clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Directories that were removed
    pub removed: Vec<String>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<String>,
}

/// Remove build output directories from a project
///
/// Removes `build/` and `dist/` with their full contents if they exist.
pub fn clean_project(project_path: &Path) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();

    for dir_name in CLEAN_DIRECTORIES {
        let dir_path = project_path.join(dir_name);

        if dir_path.exists() {
            std::fs::remove_dir_all(&dir_path).map_err(|e| FilesystemError::RemoveDir {
                path: dir_path.clone(),
                error: e.to_string(),
            })?;
            result.removed.push((*dir_name).to_string());
        } else {
            result.skipped.push((*dir_name).to_string());
        }
    }

    Ok(result)
}

/// Check if a project has any build artifacts
pub fn has_build_artifacts(project_path: &Path) -> bool {
    CLEAN_DIRECTORIES
        .iter()
        .any(|dir| project_path.join(dir).exists())
}
