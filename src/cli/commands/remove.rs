//! CLI command for `idfmgr remove`

use std::io::{self, IsTerminal, Write};

use anyhow::{bail, Context as _, Result};

use crate::cli::output::{is_json, print_detail, print_info, print_line, print_success, print_warning, status};
use crate::core::context::Context;
use crate::core::remove::{format_bytes, is_affirmative, plan_all, plan_versions, SkipReason};

/// Execute the remove command
pub async fn execute(ctx: &Context, versions: &[String], all: bool, force: bool) -> Result<()> {
    if !ctx.install_root().exists() {
        print_info(&format!(
            "Install root doesn't exist: {}",
            ctx.install_root().display()
        ));
        return Ok(());
    }

    let plan = if all {
        plan_all(ctx).context("Failed to list installed versions")?
    } else {
        if versions.is_empty() {
            bail!("Specify versions to remove or use --all");
        }
        plan_versions(ctx, versions)
    };

    for (version, reason) in &plan.skipped {
        match reason {
            SkipReason::NotInstalled => {
                print_warning(&format!("Version {version} is not installed, skipping"));
            }
            SkipReason::NotAnInstallation => print_warning(&format!(
                "{version} doesn't appear to be a valid ESP-IDF installation, skipping"
            )),
        }
    }

    if plan.targets.is_empty() {
        print_info(if all {
            "No ESP-IDF versions are installed."
        } else {
            "No valid versions to remove."
        });
        return Ok(());
    }

    print_line(&format!("Will remove {} version(s):", plan.targets.len()));
    for version in &plan.targets {
        print_detail(&format!("- {version}"));
    }

    match plan.total_size(ctx) {
        Ok(size) => print_line(&format!("\nTotal disk space to be freed: {}", format_bytes(size))),
        Err(e) => print_warning(&format!("Could not calculate disk space: {e}")),
    }

    if !force && !confirm()? {
        print_info("Operation cancelled.");
        return Ok(());
    }

    let report = plan.execute(ctx);

    if is_json() {
        let result = serde_json::json!({
            "removed": report.removed,
            "failed": report.failed.iter().map(|(v, e)| serde_json::json!({
                "version": v,
                "error": e,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_success(&format!("Removed {} version(s)", report.removed.len()));
        for version in &report.removed {
            print_detail(&format!("- {version}"));
        }
        for (version, error) in &report.failed {
            eprintln!("{} Failed to remove {version}: {error}", status::ERROR);
        }
    }

    if !report.failed.is_empty() {
        bail!("Failed to remove {} version(s)", report.failed.len());
    }
    Ok(())
}

/// Ask for confirmation on stderr
fn confirm() -> Result<bool> {
    if !io::stdin().is_terminal() {
        bail!(
            "Cannot prompt for confirmation in non-interactive mode.\n\
             Use --force to skip confirmation."
        );
    }

    eprint!("\nAre you sure you want to proceed? [y/N]: ");
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(is_affirmative(&input))
}
