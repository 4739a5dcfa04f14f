//! Output formatting and progress indicators
//!
//! Provides the global output mode (quiet/json/verbose), status prefixes,
//! formatted messages, and a spinner for long-running packager invocations.

use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Global output configuration derived from CLI flags
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    quiet: bool,
    json: bool,
    verbose: u8,
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Apply this configuration process-wide
    pub fn apply_global(&self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
        if self.verbose > 0 && self.quiet {
            tracing::warn!("--quiet overrides --verbose for console output");
        }
    }
}

/// Whether `--quiet` was requested
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether `--json` was requested
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Print an informational message unless suppressed
pub fn print_info(message: &str) {
    if !is_quiet() && !is_json() {
        println!("{} {message}", status::INFO);
    }
}

/// Print a success message unless suppressed
pub fn print_success(message: &str) {
    if !is_quiet() && !is_json() {
        println!("{} {message}", status::SUCCESS);
    }
}

/// Print a warning message to stderr unless suppressed
///
/// Warnings go to stderr so machine-readable stdout (e.g. a rendered
/// spec) stays clean.
pub fn print_warning(message: &str) {
    if !is_quiet() && !is_json() {
        eprintln!("{} {message}", status::WARNING);
    }
}

/// Print an indented detail line unless suppressed
pub fn print_detail(message: &str) {
    if !is_quiet() && !is_json() {
        println!("  {message}");
    }
}

/// Display a terminal error to stderr
///
/// Errors are always shown, regardless of `--quiet`.
pub fn display_error(error: &anyhow::Error) {
    if is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": format!("{error:#}"),
        });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {error:#}", status::ERROR);
    }
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
