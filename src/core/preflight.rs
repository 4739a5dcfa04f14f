//! Build precondition checks
//!
//! Runs before anything destructive happens: resolves the interpreter,
//! verifies the packaging library is importable (installing it once if
//! allowed), and enforces the optional minimum packager version. Any
//! failure here aborts the build with the project directory untouched.

use semver::{Version, VersionReq};

use crate::config::defaults::{PACKAGER_MODULE, PACKAGER_PACKAGE};
use crate::core::manifest::ToolConfig;
use crate::error::PreflightError;
use crate::infra::python::Interpreter;

/// Outcome of a successful preflight
#[derive(Debug)]
pub struct Preflight {
    /// The resolved interpreter
    pub interpreter: Interpreter,
    /// Interpreter version, if reported
    pub interpreter_version: Option<String>,
    /// Packager version, if reported
    pub packager_version: Option<String>,
    /// Whether the packager was installed during this run
    pub installed: bool,
}

/// Run all build preconditions
pub fn run_preflight(tool: &ToolConfig) -> Result<Preflight, PreflightError> {
    let interpreter = match &tool.python {
        Some(spec) => Interpreter::at(spec)?,
        None => Interpreter::discover()?,
    };
    let interpreter_version = interpreter.version();

    let mut installed = false;
    if !interpreter.module_available(PACKAGER_MODULE)? {
        if !tool.install_missing {
            return Err(PreflightError::PackagerUnavailable {
                interpreter: interpreter.path().to_path_buf(),
            });
        }

        interpreter.pip_install(PACKAGER_PACKAGE)?;
        installed = true;

        // The install reported success; a still-missing module means a
        // broken environment (e.g. pip targeting a different interpreter).
        if !interpreter.module_available(PACKAGER_MODULE)? {
            return Err(PreflightError::PackagerUnavailable {
                interpreter: interpreter.path().to_path_buf(),
            });
        }
    }

    let packager_version = interpreter.module_version(PACKAGER_MODULE);

    if let Some(required) = &tool.min_version {
        enforce_min_version(packager_version.as_deref(), required)?;
    }

    Ok(Preflight {
        interpreter,
        interpreter_version,
        packager_version,
        installed,
    })
}

/// Enforce the configured minimum packager version
fn enforce_min_version(found: Option<&str>, required: &str) -> Result<(), PreflightError> {
    let req = VersionReq::parse(&format!(">={required}")).map_err(|e| {
        PreflightError::InvalidVersionRequirement {
            required: required.to_string(),
            error: e.to_string(),
        }
    })?;

    let found_str = found.ok_or_else(|| PreflightError::VersionUnknown {
        required: required.to_string(),
    })?;

    let version = Version::parse(found_str).map_err(|_| PreflightError::VersionUnknown {
        required: required.to_string(),
    })?;

    if req.matches(&version) {
        Ok(())
    } else {
        Err(PreflightError::VersionBelowMinimum {
            found: found_str.to_string(),
            required: required.to_string(),
        })
    }
}
