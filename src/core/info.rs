//! Project information
//!
//! Summarizes which ESP-IDF version a project uses and what builds it has.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::builder::Toolchain;
use crate::core::context::Context;
use crate::core::install_registry::{is_installed, Installation};
use crate::core::resolver::resolve_for_project;
use crate::error::ResolveError;

/// Information about one project
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    /// ESP-IDF version bound by the marker
    pub version: String,
    /// Where that version is (or would be) installed
    pub idf_path: PathBuf,
    /// Activation script for manual use
    pub export_script: PathBuf,
    /// Whether the version is a valid installation
    pub installed: bool,
    /// Build directories present in the project
    pub builds: Vec<String>,
}

/// Collect information about the project in `project_dir`
pub fn project_info(ctx: &Context, project_dir: &Path) -> Result<ProjectInfo, ResolveError> {
    let version = resolve_for_project(project_dir)?;
    let install = Installation::new(ctx.install_root(), &version);

    let builds = [Toolchain::Gcc, Toolchain::Clang]
        .into_iter()
        .map(Toolchain::build_dir)
        .filter(|dir| project_dir.join(dir).is_dir())
        .map(String::from)
        .collect();

    Ok(ProjectInfo {
        installed: is_installed(ctx.install_root(), &version),
        export_script: install.export_script(),
        idf_path: install.path,
        version,
        builds,
    })
}
