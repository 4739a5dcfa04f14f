//! Default configuration values

/// Manifest file name at the project root
pub const MANIFEST_FILE: &str = "pybundle.toml";

/// Transient working directory recreated on every build
pub const BUILD_DIR: &str = "build";

/// Output directory the packaging tool writes the executable into
pub const DIST_DIR: &str = "dist";

/// Interpreter names probed on the search path, in order
pub const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Pip distribution name of the packaging tool
pub const PACKAGER_PACKAGE: &str = "pyinstaller";

/// Importable module name of the packaging tool
pub const PACKAGER_MODULE: &str = "PyInstaller";

/// Captured packager output, written under the build directory
pub const PACKAGER_LOG: &str = "pyinstaller.log";

/// Lines of packager output echoed to the console on failure
pub const FAILURE_LOG_TAIL: usize = 20;
