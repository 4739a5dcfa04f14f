//! CLI implementation for `pybundle clean`
//!
//! This module handles the CLI interface for removing build output.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{print_detail, print_success};
use crate::core::clean::{clean_project, has_build_artifacts};
use crate::core::manifest::Manifest;

/// Execute the clean command
pub async fn execute(path: &Path) -> Result<()> {
    // Verify we're in a pybundle project
    let _manifest = Manifest::load(path)?;

    if !has_build_artifacts(path) {
        print_success("Nothing to clean");
        return Ok(());
    }

    let result = clean_project(path).with_context(|| "Failed to clean build output")?;

    if result.removed.is_empty() {
        print_success("Nothing to clean");
    } else {
        print_success("Cleaned build output:");
        for dir in &result.removed {
            print_detail(&format!("Removed {dir}/"));
        }
    }

    Ok(())
}
