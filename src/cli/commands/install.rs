//! CLI command for `idfmgr install`

use anyhow::{Context as _, Result};

use crate::cli::output::{create_spinner, is_json, print_detail, print_info, print_success, print_warning};
use crate::core::context::Context;
use crate::core::install::{install_version, InstallOptions, InstallOutcome, LATEST};
use crate::registry::ReleaseClient;

/// Execute the install command
pub async fn execute(ctx: &Context, version: &str, options: &InstallOptions) -> Result<()> {
    let version = if version == LATEST {
        let spinner = create_spinner("Resolving latest ESP-IDF release...");
        let tag = ReleaseClient::new().latest_tag().await;
        spinner.finish_and_clear();
        tag.context("Failed to get latest version")?
    } else {
        version.to_string()
    };

    print_info(&format!("Installing ESP-IDF {version}..."));
    let outcome = install_version(ctx, &version, options)
        .with_context(|| format!("Failed to install ESP-IDF {version}"))?;

    let (path, status) = match &outcome {
        InstallOutcome::AlreadyPresent(path) => {
            print_info(&format!(
                "Version {version} is already installed at {}",
                path.display()
            ));
            (path, "already_installed")
        }
        InstallOutcome::Installed {
            path,
            clang_warning,
        } => {
            if let Some(warning) = clang_warning {
                print_warning(&format!("Failed to install esp-clang: {warning}"));
                print_detail("You can install it manually later with: idf_tools.py install esp-clang");
            }
            print_success(&format!(
                "ESP-IDF {version} installed successfully at {}",
                path.display()
            ));
            (path, "installed")
        }
    };

    if is_json() {
        let result = serde_json::json!({
            "status": status,
            "version": version,
            "path": path,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
