//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod activate;
pub mod build;
pub mod create;
pub mod doctor;
pub mod exec;
pub mod flash;
pub mod info;
pub mod install;
pub mod installed;
pub mod list;
pub mod remove;

use anyhow::Result;
use clap::Subcommand;

use crate::core::context::Context;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed ESP-IDF versions
    Installed,

    /// List available ESP-IDF releases
    List,

    /// Install an ESP-IDF version ('latest' for the newest release)
    Install {
        /// Version tag, e.g. v5.1.2, or 'latest'
        version: String,

        /// Skip prerequisite checks
        #[arg(long)]
        skip_prereqs: bool,

        /// Skip esp-clang installation
        #[arg(long)]
        skip_clang: bool,
    },

    /// Remove installed ESP-IDF versions
    Remove {
        /// Versions to remove
        versions: Vec<String>,

        /// Remove all installed versions
        #[arg(long, conflicts_with = "versions")]
        all: bool,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Create a new ESP-IDF project
    Create {
        /// Project name
        name: String,

        /// Create an Arduino-based project
        #[arg(long)]
        arduino: bool,

        /// ESP-IDF version to use (default: latest installed)
        #[arg(long = "version", value_name = "VERSION")]
        idf_version: Option<String>,

        /// Target chip
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Print the project's ESP-IDF environment for `eval`
    Activate,

    /// Build the project
    Build {
        /// Build with the Clang toolchain
        #[arg(long)]
        clang: bool,
    },

    /// Flash the project to a device
    Flash {
        /// Flash the Clang build
        #[arg(long)]
        clang: bool,

        /// Open the serial monitor after flashing
        #[arg(short, long)]
        monitor: bool,

        /// Serial port (auto-detected if not specified)
        #[arg(short, long)]
        port: Option<String>,
    },

    /// Run idf.py with the project's environment
    Exec {
        /// Arguments passed to idf.py
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show project and environment information
    Info,

    /// Check system dependencies
    Doctor,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Installed => installed::execute(ctx).await,
            Self::List => list::execute().await,
            Self::Install {
                version,
                skip_prereqs,
                skip_clang,
            } => {
                let options = crate::core::install::InstallOptions {
                    skip_prereqs: skip_prereqs || ctx.skip_prereqs(),
                    skip_clang: skip_clang || ctx.skip_clang(),
                };
                install::execute(ctx, &version, &options).await
            }
            Self::Remove {
                versions,
                all,
                force,
            } => remove::execute(ctx, &versions, all, force).await,
            Self::Create {
                name,
                arduino,
                idf_version,
                target,
            } => {
                let current_dir = std::env::current_dir()?;
                let options = crate::core::create::CreateOptions {
                    name,
                    arduino,
                    version: idf_version,
                    target: target.unwrap_or_else(|| ctx.default_target().to_string()),
                };
                create::execute(ctx, &current_dir, &options).await
            }
            Self::Activate => {
                let current_dir = std::env::current_dir()?;
                activate::execute(ctx, &current_dir).await
            }
            Self::Build { clang } => {
                let current_dir = std::env::current_dir()?;
                build::execute(ctx, &current_dir, clang).await
            }
            Self::Flash {
                clang,
                monitor,
                port,
            } => {
                let current_dir = std::env::current_dir()?;
                let options = crate::core::flash::FlashOptions {
                    toolchain: crate::core::builder::Toolchain::from_clang_flag(clang),
                    monitor,
                    port,
                };
                flash::execute(ctx, &current_dir, &options).await
            }
            Self::Exec { args } => {
                let current_dir = std::env::current_dir()?;
                exec::execute(ctx, &current_dir, &args).await
            }
            Self::Info => {
                let current_dir = std::env::current_dir()?;
                info::execute(ctx, &current_dir).await
            }
            Self::Doctor => {
                let current_dir = std::env::current_dir().ok();
                doctor::execute(ctx, current_dir.as_deref()).await
            }
        }
    }
}
