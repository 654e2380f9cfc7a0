//! CLI command for `idfmgr activate`
//!
//! On Unix this prints `export` lines for the calling shell to evaluate.
//! Where variables cannot be captured, it opens an interactive shell with
//! the activation script applied instead.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::output::print_info;
use crate::core::context::Context;
use crate::core::session::SdkSession;

/// Execute the activate command
pub async fn execute(ctx: &Context, project_dir: &Path) -> Result<()> {
    let session = SdkSession::for_project(ctx, project_dir)
        .context("Failed to activate ESP-IDF environment")?;

    if let Some(shell) = session
        .activation
        .interactive_shell(&session.installation.path)
    {
        print_info("Launching new PowerShell with ESP-IDF environment set...");
        shell.run_checked()?;
        return Ok(());
    }

    print!("{}", session.activation.environment().render_exports());
    println!("# To activate, run in your shell:");
    println!("# eval \"$(idfmgr activate)\"");
    Ok(())
}
