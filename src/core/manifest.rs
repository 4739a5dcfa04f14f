//! Manifest (pybundle.toml) parsing and validation
//!
//! The manifest is the static packaging declaration for a pybundle project:
//! which binaries and data files to embed, which module names to force-include,
//! and what the output executable is named and windowed as. It is authored by
//! a human, read once per build, and never mutated by the tool.
//!
//! Supports environment variable substitution using ${VAR} syntax in all
//! string values.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::defaults::MANIFEST_FILE;
use crate::error::PybundleError;

/// The main project manifest (pybundle.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Output executable properties
    pub app: AppConfig,

    /// Files and module names embedded into the bundle
    #[serde(default)]
    pub bundle: BundleConfig,

    /// Interpreter and packager tooling configuration
    #[serde(default)]
    pub tool: ToolConfig,
}

/// Output executable properties
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Executable name (without platform suffix)
    pub name: String,

    /// Entry script, relative to the project root
    pub entry: String,

    /// Application version
    #[serde(default)]
    pub version: Option<String>,

    /// Application description
    #[serde(default)]
    pub description: Option<String>,

    /// Suppress the console window (windowed-only application)
    #[serde(default = "default_true")]
    pub windowed: bool,

    /// Produce a single-file executable instead of a directory bundle
    #[serde(default = "default_true")]
    pub onefile: bool,

    /// Icon file, embedded only if it exists at build time
    #[serde(default)]
    pub icon: Option<String>,
}

/// Files and module names embedded into the bundle
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BundleConfig {
    /// Shared-library files placed into the bundle
    #[serde(default)]
    pub binaries: Vec<FileEntry>,

    /// Data files and directories embedded verbatim
    #[serde(default)]
    pub datas: Vec<FileEntry>,

    /// Module names force-included past the packager's static analysis
    #[serde(default)]
    pub hidden_imports: Vec<String>,

    /// Module names excluded from the bundle
    #[serde(default)]
    pub excludes: Vec<String>,

    /// Runtime hook scripts executed before the entry script
    #[serde(default)]
    pub runtime_hooks: Vec<String>,
}

/// A file or directory to embed into the bundle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileEntry {
    /// Source path, relative to the project root
    pub src: String,

    /// Destination inside the bundle, relative to the bundle root
    #[serde(default = "default_dest")]
    pub dest: String,

    /// Optional SHA256 checksum, verified by `pybundle check`
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Interpreter and packager tooling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    /// Explicit interpreter path; discovered on the search path if unset
    #[serde(default)]
    pub python: Option<String>,

    /// Install the packager via pip when it is not importable
    #[serde(default = "default_true")]
    pub install_missing: bool,

    /// Minimum acceptable packager version
    #[serde(default)]
    pub min_version: Option<String>,

    /// Extra arguments appended to the packager invocation
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            python: None,
            install_missing: true,
            min_version: None,
            extra_args: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_dest() -> String {
    ".".to_string()
}

impl Manifest {
    /// Parse a manifest from TOML content, substituting ${VAR} references
    pub fn from_toml(content: &str) -> Result<Self, PybundleError> {
        let substituted =
            substitute_env_vars_in_toml(content).map_err(PybundleError::Manifest)?;
        let manifest: Self = toml::from_str(&substituted)
            .map_err(|source| PybundleError::ManifestParse { source })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and parse the manifest from a project directory
    pub fn load(project_dir: &Path) -> Result<Self, PybundleError> {
        let path = project_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(PybundleError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }
        let content =
            std::fs::read_to_string(&path).map_err(|source| PybundleError::Io { source })?;
        Self::from_toml(&content)
    }

    /// Validate structural invariants that TOML typing cannot express
    pub fn validate(&self) -> Result<(), PybundleError> {
        if self.app.name.trim().is_empty() {
            return Err(PybundleError::Manifest(
                "app.name must not be empty".to_string(),
            ));
        }
        if self.app.name.contains('/') || self.app.name.contains('\\') {
            return Err(PybundleError::Manifest(format!(
                "app.name '{}' must not contain path separators",
                self.app.name
            )));
        }
        if self.app.entry.trim().is_empty() {
            return Err(PybundleError::Manifest(
                "app.entry must not be empty".to_string(),
            ));
        }

        for name in &self.bundle.hidden_imports {
            validate_module_name(name, "hidden_imports")?;
        }
        for name in &self.bundle.excludes {
            validate_module_name(name, "excludes")?;
        }

        for entry in self.bundle.binaries.iter().chain(&self.bundle.datas) {
            validate_file_entry(entry)?;
        }

        Ok(())
    }
}

fn validate_module_name(name: &str, list: &str) -> Result<(), PybundleError> {
    // Dotted Python module path, e.g. engineio.async_drivers.threading
    let re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("Invalid module name regex");
    if re.is_match(name) {
        Ok(())
    } else {
        Err(PybundleError::Manifest(format!(
            "'{name}' in bundle.{list} is not a valid Python module name"
        )))
    }
}

fn validate_file_entry(entry: &FileEntry) -> Result<(), PybundleError> {
    if entry.src.trim().is_empty() {
        return Err(PybundleError::Manifest(
            "bundle entry src must not be empty".to_string(),
        ));
    }

    let dest = Path::new(&entry.dest);
    if dest.is_absolute() {
        return Err(PybundleError::Manifest(format!(
            "bundle destination '{}' must be relative to the bundle root",
            entry.dest
        )));
    }
    if dest
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(PybundleError::Manifest(format!(
            "bundle destination '{}' must not traverse outside the bundle",
            entry.dest
        )));
    }

    if let Some(sum) = &entry.sha256 {
        if sum.len() != 64 || !sum.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PybundleError::Manifest(format!(
                "sha256 for '{}' must be 64 hex characters",
                entry.src
            )));
        }
    }

    Ok(())
}

/// Substitute environment variables in a string using ${VAR} syntax.
///
/// Unset variables substitute to the empty string.
///
/// # Examples
/// ```
/// use pybundle::core::manifest::substitute_env_vars;
///
/// std::env::set_var("MY_VAR", "hello");
/// let result = substitute_env_vars("prefix_${MY_VAR}_suffix").unwrap();
/// assert_eq!(result, "prefix_hello_suffix");
/// std::env::remove_var("MY_VAR");
/// ```
pub fn substitute_env_vars(input: &str) -> Result<String, String> {
    let re =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| format!("Invalid regex: {e}"))?;

    let mut last_end = 0;
    let mut output = String::new();

    for cap in re.captures_iter(input) {
        let full_match = cap.get(0).expect("capture 0 always present");
        let var_name = &cap[1];

        output.push_str(&input[last_end..full_match.start()]);
        let value = std::env::var(var_name).unwrap_or_default();
        output.push_str(&value);
        last_end = full_match.end();
    }

    output.push_str(&input[last_end..]);
    Ok(output)
}

/// Substitute environment variables in all string values of TOML content
fn substitute_env_vars_in_toml(content: &str) -> Result<String, String> {
    let mut value: toml::Value =
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {e}"))?;

    substitute_in_value(&mut value)?;

    toml::to_string_pretty(&value).map_err(|e| format!("Failed to serialize TOML: {e}"))
}

/// Recursively substitute environment variables in a TOML value
fn substitute_in_value(value: &mut toml::Value) -> Result<(), String> {
    match value {
        toml::Value::String(s) => {
            *s = substitute_env_vars(s)?;
        }
        toml::Value::Array(arr) => {
            for item in arr.iter_mut() {
                substitute_in_value(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                substitute_in_value(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MINIMAL: &str = r#"
[app]
name = "viewer"
entry = "viewer.py"
"#;

    #[test]
    fn test_minimal_manifest_defaults() {
        let manifest = Manifest::from_toml(MINIMAL).unwrap();
        assert_eq!(manifest.app.name, "viewer");
        assert_eq!(manifest.app.entry, "viewer.py");
        assert!(manifest.app.windowed);
        assert!(manifest.app.onefile);
        assert!(manifest.app.icon.is_none());
        assert!(manifest.bundle.binaries.is_empty());
        assert!(manifest.bundle.hidden_imports.is_empty());
        assert!(manifest.tool.install_missing);
        assert!(manifest.tool.python.is_none());
    }

    #[test]
    fn test_full_manifest_parses() {
        let content = r#"
[app]
name = "multiplecam"
entry = "multiplecam.py"
windowed = true
onefile = true
icon = "camera.ico"

[bundle]
hidden_imports = ["socketio", "engineio.async_drivers.threading", "vlc"]
runtime_hooks = ["hooks/use_socket.py"]

[[bundle.binaries]]
src = "libvlc.dll"

[[bundle.binaries]]
src = "libvlccore.dll"

[[bundle.datas]]
src = "cameras.json"
dest = "."

[[bundle.datas]]
src = "plugins"
dest = "plugins"

[tool]
install_missing = true
min_version = "6.0"
"#;
        let manifest = Manifest::from_toml(content).unwrap();
        assert_eq!(manifest.bundle.binaries.len(), 2);
        assert_eq!(manifest.bundle.binaries[0].dest, ".");
        assert_eq!(manifest.bundle.datas.len(), 2);
        assert_eq!(manifest.bundle.hidden_imports.len(), 3);
        assert_eq!(manifest.bundle.runtime_hooks.len(), 1);
        assert_eq!(manifest.tool.min_version.as_deref(), Some("6.0"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let content = r#"
[app]
name = ""
entry = "main.py"
"#;
        assert!(Manifest::from_toml(content).is_err());
    }

    #[test]
    fn test_name_with_separator_rejected() {
        let content = r#"
[app]
name = "dist/app"
entry = "main.py"
"#;
        assert!(Manifest::from_toml(content).is_err());
    }

    #[test]
    fn test_invalid_hidden_import_rejected() {
        let content = r#"
[app]
name = "app"
entry = "main.py"

[bundle]
hidden_imports = ["not a module"]
"#;
        assert!(Manifest::from_toml(content).is_err());
    }

    #[test]
    fn test_absolute_dest_rejected() {
        let content = r#"
[app]
name = "app"
entry = "main.py"

[[bundle.datas]]
src = "cameras.json"
dest = "/etc"
"#;
        assert!(Manifest::from_toml(content).is_err());
    }

    #[test]
    fn test_traversing_dest_rejected() {
        let content = r#"
[app]
name = "app"
entry = "main.py"

[[bundle.datas]]
src = "cameras.json"
dest = "../outside"
"#;
        assert!(Manifest::from_toml(content).is_err());
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let content = r#"
[app]
name = "app"
entry = "main.py"

[[bundle.binaries]]
src = "libvlc.dll"
sha256 = "nothex"
"#;
        assert!(Manifest::from_toml(content).is_err());
    }

    #[test]
    fn test_env_substitution_in_manifest() {
        std::env::set_var("PYBUNDLE_TEST_ENTRY", "cam_viewer.py");
        let content = r#"
[app]
name = "app"
entry = "${PYBUNDLE_TEST_ENTRY}"
"#;
        let manifest = Manifest::from_toml(content).unwrap();
        assert_eq!(manifest.app.entry, "cam_viewer.py");
        std::env::remove_var("PYBUNDLE_TEST_ENTRY");
    }

    #[test]
    fn test_unset_var_substitutes_empty() {
        let result = substitute_env_vars("a${PYBUNDLE_DEFINITELY_UNSET_VAR}b").unwrap();
        assert_eq!(result, "ab");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Strings without ${...} patterns pass through substitution unchanged
        #[test]
        fn prop_substitution_identity_without_refs(s in "[a-zA-Z0-9 ./_-]{0,40}") {
            let result = substitute_env_vars(&s).unwrap();
            prop_assert_eq!(result, s);
        }

        /// A set variable is always replaced by its value
        #[test]
        fn prop_substitution_replaces_set_var(value in "[a-zA-Z0-9]{1,20}") {
            std::env::set_var("PYBUNDLE_PROP_VAR", &value);
            let result = substitute_env_vars("x${PYBUNDLE_PROP_VAR}y").unwrap();
            std::env::remove_var("PYBUNDLE_PROP_VAR");
            prop_assert_eq!(result, format!("x{value}y"));
        }

        /// Any dotted module path is a valid hidden import
        #[test]
        fn prop_module_paths_validate(name in crate::test_utils::generators::module_path()) {
            prop_assert!(validate_module_name(&name, "hidden_imports").is_ok());
        }

        /// Any generated name and checksum produce a valid manifest
        #[test]
        fn prop_generated_manifest_validates(
            name in crate::test_utils::generators::app_name(),
            sum in crate::test_utils::generators::sha256_hash(),
        ) {
            let content = format!(
                "[app]\nname = \"{name}\"\nentry = \"{name}.py\"\n\n\
                 [[bundle.binaries]]\nsrc = \"libvlc.dll\"\nsha256 = \"{sum}\"\n"
            );
            prop_assert!(Manifest::from_toml(&content).is_ok());
        }
    }
}
