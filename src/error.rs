//! Error types for pybundle
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Project initialization errors
#[derive(Error, Debug)]
pub enum InitError {
    /// Directory not found
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Directory is not empty
    #[error("Directory is not empty: {path}. Use --force to initialize anyway")]
    DirectoryNotEmpty { path: PathBuf },

    /// IO error during initialization
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },

    /// Manifest generation error
    #[error("Failed to create manifest: {error}")]
    ManifestError { error: String },
}

/// Build precondition errors
///
/// Raised before anything destructive happens. A preflight failure leaves
/// the project directory untouched.
#[derive(Error, Debug)]
pub enum PreflightError {
    /// No interpreter resolvable on the search path
    #[error("Python interpreter not found in PATH (tried: {})", candidates.join(", "))]
    InterpreterNotFound { candidates: Vec<String> },

    /// Explicitly configured interpreter does not exist
    #[error("Configured interpreter '{path}' does not exist")]
    InterpreterMissing { path: PathBuf },

    /// Interpreter could not be executed
    #[error("Failed to run interpreter '{path}': {error}")]
    InterpreterFailed { path: PathBuf, error: String },

    /// Packaging library not importable and automatic install is disabled
    #[error(
        "PyInstaller is not importable by '{interpreter}' and install_missing is disabled"
    )]
    PackagerUnavailable { interpreter: PathBuf },

    /// Automatic installation of the packaging library failed
    #[error("Failed to install '{package}': {detail}")]
    InstallFailed { package: String, detail: String },

    /// Installed packager is older than the configured minimum
    #[error("PyInstaller {found} is older than required minimum {required}")]
    VersionBelowMinimum { found: String, required: String },

    /// Packager version could not be determined or parsed
    #[error("Cannot determine PyInstaller version to enforce min_version '{required}'")]
    VersionUnknown { required: String },

    /// Invalid min_version requirement in the manifest
    #[error("Invalid min_version '{required}': {error}")]
    InvalidVersionRequirement { required: String, error: String },
}

/// Packaging invocation errors
#[derive(Error, Debug)]
pub enum BundleError {
    /// Packaging tool could not be launched
    #[error("Failed to launch packaging tool: {error}")]
    PackagerSpawn { error: String },

    /// Packaging tool ran and reported failure
    #[error("Packaging tool exited with {status} (see {log})")]
    PackagerFailed { status: String, log: PathBuf },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Top-level pybundle error type
#[derive(Error, Debug)]
pub enum PybundleError {
    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Manifest not found
    #[error("Manifest not found at '{path}'. Run 'pybundle init' to create a project.")]
    ManifestNotFound { path: String },

    /// Manifest parse error
    #[error("Failed to parse manifest: {source}")]
    ManifestParse { source: toml::de::Error },

    /// Preflight error
    #[error("Preflight error: {0}")]
    Preflight(#[from] PreflightError),

    /// Bundle error
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Init error
    #[error("Init error: {0}")]
    Init(#[from] InitError),

    /// IO error
    #[error("IO error: {source}")]
    Io { source: std::io::Error },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
