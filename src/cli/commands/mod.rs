//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod clean;
pub mod doctor;
pub mod init;
pub mod spec;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new pybundle project
    Init {
        /// Executable name (derived from the directory if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },

    /// Verify declared bundle inputs without building
    Check,

    /// Remove build output directories
    Clean,

    /// Check system dependencies
    Doctor,

    /// Render the packaging spec the build would use
    Spec {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Bundle the application into a standalone executable
    Build,
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Self::Init { name, force } => {
                let current_dir = std::env::current_dir()?;
                init::execute(&current_dir, name, force).await
            }
            Self::Check => {
                let current_dir = std::env::current_dir()?;
                check::execute(&current_dir).await
            }
            Self::Clean => {
                let current_dir = std::env::current_dir()?;
                clean::execute(&current_dir).await
            }
            Self::Doctor => {
                let current_dir = std::env::current_dir().ok();
                doctor::execute(current_dir.as_deref()).await
            }
            Self::Spec { output } => {
                let current_dir = std::env::current_dir()?;
                spec::execute(&current_dir, output.as_deref()).await
            }
            Self::Build => {
                let current_dir = std::env::current_dir()?;
                build::execute(&current_dir).await
            }
        }
    }
}
