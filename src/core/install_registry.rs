//! Install registry
//!
//! Enumerates and validates the ESP-IDF versions under an install root.
//! Validity is structural: a directory is an installation iff it contains
//! the tool directory, the component directory and the activation script.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults::{EXPORT_BATCH, EXPORT_SCRIPT, REQUIRED_MARKERS, TOOLS_DIR};
use crate::error::RegistryError;

/// An installed ESP-IDF version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    /// Version identifier (directory name)
    pub version: String,
    /// Installation directory (`IDF_PATH`)
    pub path: PathBuf,
}

impl Installation {
    /// Create an installation record for `root/version`
    pub fn new(root: &Path, version: &str) -> Self {
        Self {
            version: version.to_string(),
            path: root.join(version),
        }
    }

    /// Unix activation script
    pub fn export_script(&self) -> PathBuf {
        self.path.join(EXPORT_SCRIPT)
    }

    /// Windows activation script
    pub fn export_batch(&self) -> PathBuf {
        self.path.join(EXPORT_BATCH)
    }

    /// The `idf.py` driver
    pub fn idf_py(&self) -> PathBuf {
        self.path.join(TOOLS_DIR).join("idf.py")
    }

    /// The `idf_tools.py` helper
    pub fn idf_tools_py(&self) -> PathBuf {
        self.path.join(TOOLS_DIR).join("idf_tools.py")
    }

    /// Whether the directory still has the shape of an installation
    pub fn is_valid(&self) -> bool {
        is_valid_install(&self.path)
    }
}

/// Check whether `path` contains every required marker
pub fn is_valid_install(path: &Path) -> bool {
    REQUIRED_MARKERS
        .iter()
        .all(|marker| path.join(marker).exists())
}

/// List installed versions under `root`, sorted as plain strings
///
/// A missing root means nothing is installed yet and yields an empty list.
pub fn list_installed(root: &Path) -> Result<Vec<String>, RegistryError> {
    if !root.exists() {
        tracing::debug!("Install root {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(root).map_err(|e| RegistryError::UnreadableRoot {
        path: root.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut versions: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter(|entry| is_valid_install(&entry.path()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    versions.sort();
    tracing::debug!("Found {} installed version(s)", versions.len());
    Ok(versions)
}

/// Check whether `version` is a valid installation under `root`
pub fn is_installed(root: &Path, version: &str) -> bool {
    let mut components = Path::new(version).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => is_valid_install(&root.join(version)),
        _ => false,
    }
}

/// Total size in bytes of the regular files under `path`
pub fn installation_size(path: &Path) -> Result<u64, walkdir::Error> {
    let mut total = 0;
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}
