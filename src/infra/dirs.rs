//! Platform-specific directory management
//!
//! Provides the default install root and the config directory.
//!
//! Environment variables can override default directories:
//! - `ESP_BASE` - Override the install root
//! - `IDFMGR_CONFIG_DIR` - Override the config directory

use std::env;
use std::path::PathBuf;

use crate::config::defaults::{ENV_INSTALL_ROOT, INSTALL_ROOT_DIR};

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "IDFMGR_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "idfmgr";

/// Directory provider for idfmgr
///
/// Read once per invocation; the resolved paths are then carried in
/// [`crate::core::context::Context`].
#[derive(Debug, Clone)]
pub struct IdfmgrDirs {
    install_root_override: Option<PathBuf>,
    default_install_root: PathBuf,
    config_dir: PathBuf,
}

impl IdfmgrDirs {
    /// Create a new `IdfmgrDirs` instance
    ///
    /// Checks environment variables first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            install_root_override: Self::env_path(ENV_INSTALL_ROOT),
            default_install_root: Self::home_install_root(),
            config_dir: Self::env_path(ENV_CONFIG_DIR).unwrap_or_else(Self::platform_config_dir),
        }
    }

    /// Install root taken from `ESP_BASE`, if set
    #[must_use]
    pub fn install_root_override(&self) -> Option<PathBuf> {
        self.install_root_override.clone()
    }

    /// Install root used when nothing overrides it: `<home>/.esp`
    #[must_use]
    pub fn default_install_root(&self) -> PathBuf {
        self.default_install_root.clone()
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/idfmgr` or `~/.config/idfmgr`
    /// - macOS: `~/Library/Application Support/idfmgr`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the global config file path
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Read a non-empty path from the environment
    fn env_path(name: &str) -> Option<PathBuf> {
        env::var_os(name)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    fn home_install_root() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(INSTALL_ROOT_DIR))
            .unwrap_or_else(|| PathBuf::from(INSTALL_ROOT_DIR))
    }

    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for IdfmgrDirs {
    fn default() -> Self {
        Self::new()
    }
}
