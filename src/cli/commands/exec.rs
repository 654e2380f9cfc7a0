//! CLI command for `idfmgr exec`
//!
//! Passes its arguments to `idf.py` unchanged. The tool's exit code becomes
//! idfmgr's exit code.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::core::context::Context;
use crate::core::session::SdkSession;

/// Execute the exec command
pub async fn execute(ctx: &Context, project_dir: &Path, args: &[String]) -> Result<()> {
    let session = SdkSession::for_project(ctx, project_dir)
        .context("Failed to set up ESP-IDF environment")?;
    session.idf(args, project_dir).run_checked()?;
    Ok(())
}
