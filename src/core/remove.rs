//! Version removal logic
//!
//! Plans which installations to delete, measures them, and removes them.
//! Confirmation is the caller's concern.

use std::path::PathBuf;

use crate::core::context::Context;
use crate::core::install_registry::{installation_size, is_valid_install, list_installed};
use crate::error::RegistryError;
use crate::infra::filesystem::remove_dir_all;

/// Why a requested version was left out of a removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No directory for the version exists
    NotInstalled,
    /// The directory is not a valid installation
    NotAnInstallation,
}

/// Versions selected for removal
#[derive(Debug, Default)]
pub struct RemovalPlan {
    /// Versions to remove, in request order
    pub targets: Vec<String>,
    /// Requested versions that were skipped
    pub skipped: Vec<(String, SkipReason)>,
}

/// Outcome of executing a plan
#[derive(Debug, Default)]
pub struct RemovalReport {
    /// Versions removed
    pub removed: Vec<String>,
    /// Versions that could not be removed, with the reason
    pub failed: Vec<(String, String)>,
}

/// Select every valid installation
pub fn plan_all(ctx: &Context) -> Result<RemovalPlan, RegistryError> {
    Ok(RemovalPlan {
        targets: list_installed(ctx.install_root())?,
        skipped: Vec::new(),
    })
}

/// Select the requested versions that are valid installations
pub fn plan_versions(ctx: &Context, versions: &[String]) -> RemovalPlan {
    let mut plan = RemovalPlan::default();
    for version in versions {
        let path = ctx.version_dir(version);
        if !path.exists() {
            plan.skipped.push((version.clone(), SkipReason::NotInstalled));
        } else if !is_valid_install(&path) {
            plan.skipped
                .push((version.clone(), SkipReason::NotAnInstallation));
        } else if !plan.targets.contains(version) {
            plan.targets.push(version.clone());
        }
    }
    plan
}

impl RemovalPlan {
    /// Directories that would be deleted
    pub fn paths(&self, ctx: &Context) -> Vec<PathBuf> {
        self.targets.iter().map(|v| ctx.version_dir(v)).collect()
    }

    /// Total size of the targets in bytes
    pub fn total_size(&self, ctx: &Context) -> Result<u64, walkdir::Error> {
        self.paths(ctx)
            .iter()
            .map(|path| installation_size(path))
            .sum()
    }

    /// Delete every target, continuing past failures
    pub fn execute(&self, ctx: &Context) -> RemovalReport {
        let mut report = RemovalReport::default();
        for version in &self.targets {
            match remove_dir_all(&ctx.version_dir(version)) {
                Ok(()) => {
                    tracing::info!("Removed ESP-IDF {version}");
                    report.removed.push(version.clone());
                }
                Err(e) => report.failed.push((version.clone(), e.to_string())),
            }
        }
        report
    }
}

/// Format a byte count with binary units, e.g. `1.5 GB`
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let prefix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {prefix}B", bytes as f64 / div as f64)
}

/// Whether a confirmation answer means yes
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
