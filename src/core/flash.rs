//! Flash invocation logic
//!
//! Flashing reuses an existing build; it never builds on its own.

use std::path::Path;

use crate::core::builder::Toolchain;
use crate::error::ProjectError;

/// Flash options from CLI
#[derive(Debug, Clone, Default)]
pub struct FlashOptions {
    /// Which build to flash
    pub toolchain: Toolchain,
    /// Open the serial monitor after flashing
    pub monitor: bool,
    /// Serial port; `idf.py` auto-detects when absent
    pub port: Option<String>,
}

impl FlashOptions {
    /// Arguments passed to `idf.py`
    pub fn idf_args(&self) -> Vec<String> {
        let mut args = vec!["-B".to_string(), self.toolchain.build_dir().to_string()];
        if let Some(port) = &self.port {
            args.push("-p".to_string());
            args.push(port.clone());
        }
        args.push("flash".to_string());
        if self.monitor {
            args.push("monitor".to_string());
        }
        args
    }

    /// Fail unless the selected build exists in `project_dir`
    pub fn require_build(&self, project_dir: &Path) -> Result<(), ProjectError> {
        let build_dir = self.toolchain.build_dir();
        if project_dir.join(build_dir).is_dir() {
            Ok(())
        } else {
            Err(ProjectError::NotBuilt {
                build_dir: build_dir.to_string(),
                command: self.toolchain.build_command().to_string(),
            })
        }
    }
}
