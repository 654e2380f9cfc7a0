//! Per-invocation settings
//!
//! [`Context`] is built once by the CLI layer from the environment and the
//! global config file, then passed by reference to every operation.

use std::path::{Path, PathBuf};

use crate::core::global_config::GlobalConfig;
use crate::infra::dirs::IdfmgrDirs;

/// Resolved settings for one idfmgr invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    install_root: PathBuf,
    python: String,
    default_target: String,
    skip_clang: bool,
    skip_prereqs: bool,
}

impl Context {
    /// Combine the directory provider and the parsed config file
    ///
    /// Install root precedence: `ESP_BASE`, then the `install_root` config
    /// key, then `<home>/.esp`.
    pub fn from_parts(dirs: &IdfmgrDirs, config: &GlobalConfig) -> Self {
        let install_root = dirs
            .install_root_override()
            .or_else(|| config.install_root.clone())
            .unwrap_or_else(|| dirs.default_install_root());

        tracing::debug!("Install root: {}", install_root.display());

        Self {
            install_root,
            python: config.python().to_string(),
            default_target: config.default_target().to_string(),
            skip_clang: config.install.skip_clang.unwrap_or(false),
            skip_prereqs: config.install.skip_prereqs.unwrap_or(false),
        }
    }

    /// Context rooted at an explicit install root with default settings
    pub fn with_install_root(install_root: impl Into<PathBuf>) -> Self {
        let config = GlobalConfig::default();
        Self {
            install_root: install_root.into(),
            python: config.python().to_string(),
            default_target: config.default_target().to_string(),
            skip_clang: false,
            skip_prereqs: false,
        }
    }

    /// Replace the python interpreter
    #[must_use]
    pub fn with_python(mut self, python: &str) -> Self {
        self.python = python.to_string();
        self
    }

    /// Directory holding one subdirectory per installed version
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Directory a given version is (or would be) installed to
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.install_root.join(version)
    }

    /// Interpreter used to run `idf.py`
    pub fn python(&self) -> &str {
        &self.python
    }

    /// Chip target used when none is given
    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    /// Whether installs skip esp-clang unless asked
    pub fn skip_clang(&self) -> bool {
        self.skip_clang
    }

    /// Whether installs skip the prerequisite check unless asked
    pub fn skip_prereqs(&self) -> bool {
        self.skip_prereqs
    }
}
