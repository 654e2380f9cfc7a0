//! CLI command for `idfmgr build`

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::output::{print_info, print_success};
use crate::core::builder::{build, BuildOptions, Toolchain};
use crate::core::context::Context;
use crate::core::session::SdkSession;

/// Execute the build command
pub async fn execute(ctx: &Context, project_dir: &Path, clang: bool) -> Result<()> {
    let options = BuildOptions {
        toolchain: Toolchain::from_clang_flag(clang),
    };

    let session = SdkSession::for_project(ctx, project_dir)
        .context("Failed to set up ESP-IDF environment")?;

    print_info(&format!(
        "Building with {} toolchain...",
        options.toolchain.name()
    ));
    build(&session, project_dir, &options).context("Build failed")?;

    print_success(&format!(
        "Build successful! Output in {}/",
        options.toolchain.build_dir()
    ));
    Ok(())
}
