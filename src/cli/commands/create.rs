//! CLI command for `idfmgr create`

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::output::{is_json, print_detail, print_success};
use crate::core::context::Context;
use crate::core::create::{create_project, CreateOptions};

/// Execute the create command
pub async fn execute(ctx: &Context, parent_dir: &Path, options: &CreateOptions) -> Result<()> {
    let result = create_project(ctx, parent_dir, options)
        .with_context(|| format!("Failed to create project '{}'", options.name))?;

    if is_json() {
        let json = serde_json::json!({
            "status": "success",
            "name": options.name,
            "path": result.path,
            "version": result.version,
            "target": options.target,
            "arduino": options.arduino,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_success(&format!("Project '{}' created successfully!", options.name));
    print_detail(&format!("ESP-IDF: {}", result.version));
    print_detail(&format!("Target:  {}", options.target));
    print_detail(&format!("Next:    cd {} && idfmgr build", options.name));
    Ok(())
}
