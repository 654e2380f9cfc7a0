//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::Parser;

use crate::core::context::Context;
use crate::error::{IdfmgrError, LaunchError};
use commands::Commands;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("VERGEN_GIT_SHA"),
    "\nbuilt:  ",
    env!("VERGEN_BUILD_DATE"),
    "\ntarget: ",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

/// idfmgr - ESP-IDF version manager
///
/// Install several ESP-IDF versions side by side and bind each project to
/// one of them.
#[derive(Parser, Debug)]
#[command(name = "idfmgr")]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self, ctx: &Context) -> Result<()> {
        if let Some(cmd) = self.command {
            cmd.run(ctx).await
        } else {
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}

/// Exit code for a failed command
///
/// A tool that ran and failed passes its own code through; every other
/// failure exits with 1.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| {
            cause
                .downcast_ref::<LaunchError>()
                .or_else(|| match cause.downcast_ref::<IdfmgrError>() {
                    Some(IdfmgrError::Launch(launch)) => Some(launch),
                    _ => None,
                })
        })
        .map_or(1, LaunchError::exit_code)
}
