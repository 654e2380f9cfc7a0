//! CLI command for `idfmgr list`

use anyhow::{Context as _, Result};

use crate::cli::output::{create_spinner, is_json, is_quiet, print_detail, print_line};
use crate::config::defaults::RELEASE_LIST_LIMIT;
use crate::registry::ReleaseClient;

/// Execute the list command
pub async fn execute() -> Result<()> {
    let spinner = create_spinner("Fetching ESP-IDF releases...");
    let releases = ReleaseClient::new().list_releases().await;
    spinner.finish_and_clear();
    let releases = releases.context("Failed to list releases")?;

    if is_json() {
        println!("{}", serde_json::to_string_pretty(&releases)?);
        return Ok(());
    }

    if is_quiet() {
        for release in &releases {
            println!("{}", release.tag_name);
        }
        return Ok(());
    }

    print_line(&format!(
        "Available ESP-IDF versions (showing latest {RELEASE_LIST_LIMIT}):\n"
    ));
    print_line(&format!(
        "{:<15} {:<20} {:<12} {}",
        "VERSION", "PUBLISHED", "TYPE", "NAME"
    ));
    print_line(&"-".repeat(70));
    for release in &releases {
        print_line(&format!(
            "{:<15} {:<20} {:<12} {}",
            release.tag_name,
            release.published_date(),
            release.kind(),
            release.name
        ));
    }
    print_line("");
    print_detail("To install a version: idfmgr install <version>");

    Ok(())
}
