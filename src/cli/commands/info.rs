//! CLI command for `idfmgr info`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{is_json, print_line, status};
use crate::core::context::Context;
use crate::core::info::project_info;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━";

/// Execute the info command
pub async fn execute(ctx: &Context, project_dir: &Path) -> Result<()> {
    let info = project_info(ctx, project_dir)?;

    if is_json() {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_line("Project Information");
    print_line(RULE);
    print_line(&format!("ESP-IDF Version: {}", info.version));
    print_line(&format!("IDF Path:        {}", info.idf_path.display()));

    if !info.installed {
        print_line(&format!(
            "\n{} ESP-IDF version {} is not installed",
            status::WARNING,
            info.version
        ));
        print_line(&format!("Install it with: idfmgr install {}", info.version));
        return Ok(());
    }

    if !info.builds.is_empty() {
        print_line("\nBuild Status");
        print_line(RULE);
        for dir in &info.builds {
            print_line(&format!("{} {dir}/ exists", status::SUCCESS));
        }
    }

    print_line("\nUsage");
    print_line(RULE);
    print_line("Use idfmgr commands (recommended):");
    for example in ["build", "flash", "exec menuconfig", "exec monitor"] {
        print_line(&format!("  idfmgr {example}"));
    }
    print_line("\nOr manually activate the environment:");
    print_line(&format!("  . {}", info.export_script.display()));
    print_line("  idf.py build");

    Ok(())
}
