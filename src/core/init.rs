//! Project initialization logic
//!
//! Creates the manifest and .gitignore for a new pybundle project.

use std::path::Path;

use crate::config::defaults::MANIFEST_FILE;
use crate::core::manifest::Manifest;
use crate::error::InitError;

/// Entries to add to .gitignore
pub const GITIGNORE_ENTRIES: &[&str] = &["build/", "dist/"];

/// Marker comment for the pybundle section in .gitignore
pub const GITIGNORE_MARKER: &str = "# pybundle";

/// Options for project initialization
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Executable name (derived from the directory if unset)
    pub name: Option<String>,
    /// Force initialization in non-empty directory
    pub force: bool,
}

/// Generate the default manifest content with comments
pub fn generate_manifest_content(app_name: &str) -> String {
    format!(
        r#"# Pybundle packaging declaration
# Everything the packaging tool embeds into the executable is declared here.

[app]
name = "{app_name}"
entry = "{app_name}.py"
# Suppress the console window (windowed-only application):
windowed = true
# Single-file executable instead of a directory bundle:
onefile = true
# Embedded only if the file exists at build time:
# icon = "app.ico"

[bundle]
# Module names invisible to the packager's static analysis:
# hidden_imports = ["socketio", "engineio.async_drivers.threading", "vlc"]
# Hook scripts executed before the entry script:
# runtime_hooks = ["hooks/use_socket.py"]

# Shared libraries placed at the bundle root:
# [[bundle.binaries]]
# src = "libvlc.dll"
# sha256 = "..."

# Data files and directories, preserving relative destinations:
# [[bundle.datas]]
# src = "cameras.json"
# dest = "."
#
# [[bundle.datas]]
# src = "plugins"
# dest = "plugins"

[tool]
# Explicit interpreter; discovered on PATH when unset:
# python = "C:/Python311/python.exe"
# Install PyInstaller automatically when it is not importable:
install_missing = true
# min_version = "6.0"
"#
    )
}

/// Generate .gitignore content for pybundle
pub fn generate_gitignore_content() -> String {
    let mut content = String::from(GITIGNORE_MARKER);
    content.push('\n');
    for entry in GITIGNORE_ENTRIES {
        content.push_str(entry);
        content.push('\n');
    }
    content
}

/// Check if .gitignore already has pybundle entries
pub fn gitignore_has_pybundle_entries(content: &str) -> bool {
    content.contains(GITIGNORE_MARKER)
}

/// Append pybundle entries to existing .gitignore content
pub fn append_gitignore_entries(existing: &str) -> String {
    if gitignore_has_pybundle_entries(existing) {
        // Idempotent
        return existing.to_string();
    }

    let mut result = existing.to_string();
    if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
    }
    if !result.is_empty() {
        result.push('\n');
    }
    result.push_str(&generate_gitignore_content());
    result
}

/// Validate initialization can proceed
pub fn validate_init(path: &Path, options: &InitOptions) -> Result<(), InitError> {
    if !path.exists() {
        return Err(InitError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }

    // The project usually already contains the Python sources; only an
    // existing manifest blocks initialization.
    if path.join(MANIFEST_FILE).exists() && !options.force {
        return Err(InitError::DirectoryNotEmpty {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Derive the app name from the project directory
pub fn derive_app_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "my-app".to_string())
}

/// Parse the generated manifest back (sanity check before writing)
pub fn parse_manifest(content: &str) -> Result<Manifest, InitError> {
    Manifest::from_toml(content).map_err(|e| InitError::ManifestError {
        error: e.to_string(),
    })
}
