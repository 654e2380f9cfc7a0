//! Version resolution
//!
//! Decides which installed ESP-IDF version applies to an operation: the one
//! bound by a project's `.espidf-version`, an explicitly requested one, or
//! the latest installed.

use std::path::Path;

use crate::config::defaults::VERSION_MARKER;
use crate::core::install_registry::{is_installed, list_installed, Installation};
use crate::error::{FilesystemError, ResolveError};

/// Read the version bound to the project in `project_dir`
///
/// Trailing whitespace in the marker is insignificant.
pub fn resolve_for_project(project_dir: &Path) -> Result<String, ResolveError> {
    let marker = project_dir.join(VERSION_MARKER);
    if !marker.exists() {
        return Err(ResolveError::NoProjectMarker {
            path: Path::new(VERSION_MARKER).to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(&marker).map_err(|e| ResolveError::MarkerUnreadable {
        path: marker.clone(),
        error: e.to_string(),
    })?;

    let version = content.trim_end();
    if version.is_empty() {
        return Err(ResolveError::EmptyMarker { path: marker });
    }

    tracing::debug!("Project {} uses {version}", project_dir.display());
    Ok(version.to_string())
}

/// Pick the version for a new project
///
/// An explicit version wins when it is installed. Otherwise the greatest
/// installed version by plain string order is used.
pub fn resolve_for_new_project(
    root: &Path,
    explicit: Option<&str>,
) -> Result<String, ResolveError> {
    if let Some(version) = explicit {
        if is_installed(root, version) {
            return Ok(version.to_string());
        }
        tracing::warn!("ESP-IDF {version} is not installed, using the latest installed version");
    }
    latest_installed(root)
}

/// The greatest installed version by plain string order
pub fn latest_installed(root: &Path) -> Result<String, ResolveError> {
    list_installed(root)?
        .into_iter()
        .max()
        .ok_or(ResolveError::NoVersionsInstalled)
}

/// Bind `project_dir` to `version`
pub fn write_project_marker(project_dir: &Path, version: &str) -> Result<(), FilesystemError> {
    let marker = project_dir.join(VERSION_MARKER);
    std::fs::write(&marker, format!("{version}\n")).map_err(|e| FilesystemError::WriteFile {
        path: marker,
        error: e.to_string(),
    })
}

/// Confirm `version` is a valid installation under `root`
pub fn locate(root: &Path, version: &str) -> Result<Installation, ResolveError> {
    if !is_installed(root, version) {
        return Err(ResolveError::NotInstalled {
            version: version.to_string(),
        });
    }
    Ok(Installation::new(root, version))
}
