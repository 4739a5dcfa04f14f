//! CLI implementation for `pybundle init`
//!
//! This module handles the CLI interface for project initialization.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{print_detail, print_success};
use crate::config::defaults::MANIFEST_FILE;
use crate::core::init::{
    append_gitignore_entries, derive_app_name, generate_gitignore_content,
    generate_manifest_content, parse_manifest, validate_init, InitOptions,
};

/// Execute the init command
pub async fn execute(path: &Path, name: Option<String>, force: bool) -> Result<()> {
    let options = InitOptions {
        name: name.clone(),
        force,
    };

    validate_init(path, &options).with_context(|| "Failed to validate initialization")?;

    let app_name = name.unwrap_or_else(|| derive_app_name(path));
    let manifest_content = generate_manifest_content(&app_name);

    // The generated template must itself parse
    parse_manifest(&manifest_content).with_context(|| "Generated manifest is invalid")?;

    let manifest_path = path.join(MANIFEST_FILE);
    std::fs::write(&manifest_path, &manifest_content)
        .with_context(|| format!("Failed to write manifest to {}", manifest_path.display()))?;

    let gitignore_path = path.join(".gitignore");
    let gitignore_existed = gitignore_path.exists();
    let gitignore_content = if gitignore_existed {
        let existing = std::fs::read_to_string(&gitignore_path)
            .with_context(|| format!("Failed to read {}", gitignore_path.display()))?;
        append_gitignore_entries(&existing)
    } else {
        generate_gitignore_content()
    };

    std::fs::write(&gitignore_path, &gitignore_content)
        .with_context(|| format!("Failed to write {}", gitignore_path.display()))?;

    print_success(&format!(
        "Initialized pybundle project '{app_name}' in {}",
        path.display()
    ));
    print_detail(&format!("Created {MANIFEST_FILE}"));
    if gitignore_existed {
        print_detail("Updated .gitignore");
    } else {
        print_detail("Created .gitignore");
    }
    print_detail(&format!(
        "Declare binaries, data files, and hidden imports in {MANIFEST_FILE}, then run 'pybundle build'"
    ));

    Ok(())
}
