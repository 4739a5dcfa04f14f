//! CLI implementation for `pybundle spec`
//!
//! Renders the packaging spec the build would use, for inspection.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{print_success, print_warning};
use crate::core::manifest::Manifest;
use crate::core::spec;

/// Execute the spec command
pub async fn execute(project_dir: &Path, output: Option<&str>) -> Result<()> {
    let manifest = Manifest::load(project_dir)?;

    let rendered = spec::render(&manifest, project_dir);
    for warning in &rendered.warnings {
        print_warning(warning);
    }

    match output {
        Some(path) => {
            let target = project_dir.join(path);
            crate::infra::filesystem::write_file(&target, &rendered.content)
                .with_context(|| format!("Failed to write spec to {}", target.display()))?;
            print_success(&format!("Wrote {}", target.display()));
        }
        None => {
            print!("{}", rendered.content);
        }
    }

    Ok(())
}
