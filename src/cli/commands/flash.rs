//! CLI command for `idfmgr flash`

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::output::{print_detail, print_info, print_success};
use crate::core::context::Context;
use crate::core::flash::FlashOptions;
use crate::core::session::SdkSession;

/// Execute the flash command
pub async fn execute(ctx: &Context, project_dir: &Path, options: &FlashOptions) -> Result<()> {
    print_info(&format!("Flashing {} build...", options.toolchain.name()));
    let session = SdkSession::for_project(ctx, project_dir)
        .context("Failed to set up ESP-IDF environment")?;
    options.require_build(project_dir)?;

    if options.monitor {
        print_info("Flashing and opening serial monitor...");
    }
    session
        .idf(options.idf_args(), project_dir)
        .run_checked()
        .context("Flash failed")?;

    if !options.monitor {
        print_success("Flash successful!");
        print_detail("Tip: Use 'idfmgr flash --monitor' to open serial monitor after flashing");
    }
    Ok(())
}
