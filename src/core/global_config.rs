//! Global configuration management
//!
//! Reads optional settings from `config.toml` in the config directory:
//! install root, python interpreter, default chip target, install and output
//! preferences.

use crate::infra::dirs::IdfmgrDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Global configuration error types
#[derive(Error, Debug)]
pub enum GlobalConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Global configuration for idfmgr
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GlobalConfig {
    /// Install root used when `ESP_BASE` is not set
    pub install_root: Option<PathBuf>,

    /// Python interpreter used to run `idf.py`
    pub python: Option<String>,

    /// Chip target for new projects
    pub default_target: Option<String>,

    /// Install preferences
    #[serde(default)]
    pub install: InstallConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputPreferences,
}

/// Install preferences
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InstallConfig {
    /// Skip the esp-clang install step by default
    pub skip_clang: Option<bool>,

    /// Skip the prerequisite check by default
    pub skip_prereqs: Option<bool>,
}

/// Output preferences
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OutputPreferences {
    /// Enable quiet mode
    pub quiet: Option<bool>,

    /// Enable JSON output
    pub json: Option<bool>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// A missing file yields the default configuration; a file that exists
    /// but is not valid TOML is an error.
    pub fn load(dirs: &IdfmgrDirs) -> Result<Self, GlobalConfigError> {
        Self::load_from_path(&dirs.global_config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, GlobalConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| GlobalConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| GlobalConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Get the effective python interpreter
    #[must_use]
    pub fn python(&self) -> &str {
        self.python
            .as_deref()
            .unwrap_or(crate::config::defaults::DEFAULT_PYTHON)
    }

    /// Get the effective default chip target
    #[must_use]
    pub fn default_target(&self) -> &str {
        self.default_target
            .as_deref()
            .unwrap_or(crate::config::defaults::DEFAULT_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert!(config.install_root.is_none());
        assert_eq!(config.python(), crate::config::defaults::DEFAULT_PYTHON);
        assert_eq!(config.default_target(), "esp32");
        assert!(config.install.skip_clang.is_none());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config = GlobalConfig::load_from_path(&config_path).unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let content = r#"
install_root = "/opt/esp"
python = "python3.11"
default_target = "esp32s3"

[install]
skip_clang = true
"#;
        fs::write(&config_path, content).unwrap();

        let config = GlobalConfig::load_from_path(&config_path).unwrap();
        assert_eq!(config.install_root, Some(PathBuf::from("/opt/esp")));
        assert_eq!(config.python(), "python3.11");
        assert_eq!(config.default_target(), "esp32s3");
        assert_eq!(config.install.skip_clang, Some(true));
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        fs::write(&config_path, "invalid toml [[[").unwrap();

        let result = GlobalConfig::load_from_path(&config_path);
        assert!(matches!(result, Err(GlobalConfigError::ParseError { .. })));
    }
}
