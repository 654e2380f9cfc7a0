//! CLI command for `idfmgr installed`

use anyhow::{Context as _, Result};

use crate::cli::output::{is_json, is_quiet, print_detail, print_info, print_line};
use crate::core::context::Context;
use crate::core::install_registry::list_installed;

/// Execute the installed command
pub async fn execute(ctx: &Context) -> Result<()> {
    let root = ctx.install_root();
    let versions = list_installed(root).context("Failed to list installed versions")?;

    if is_json() {
        let entries: Vec<_> = versions
            .iter()
            .map(|v| {
                serde_json::json!({
                    "version": v,
                    "path": ctx.version_dir(v),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if is_quiet() {
        for version in &versions {
            println!("{version}");
        }
        return Ok(());
    }

    if versions.is_empty() {
        if root.exists() {
            print_info("No ESP-IDF versions found.");
        } else {
            print_info(&format!("Install root doesn't exist: {}", root.display()));
        }
        print_detail("Install a version with: idfmgr install <version>");
        return Ok(());
    }

    print_line(&format!("Installed ESP-IDF versions in {}:\n", root.display()));
    print_line(&format!("{:<15} {}", "VERSION", "PATH"));
    print_line(&"-".repeat(50));
    for version in &versions {
        print_line(&format!("{version:<15} {}", ctx.version_dir(version).display()));
    }
    print_line(&format!("\nTotal: {} version(s) installed", versions.len()));

    Ok(())
}
