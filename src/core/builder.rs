//! Build invocation logic
//!
//! Maps the user's toolchain choice onto `idf.py` arguments and build
//! directories. GCC builds go to `build/`, Clang builds to `build-clang/`,
//! so both can coexist in one project.

use std::path::{Path, PathBuf};

use crate::config::defaults::{CLANG_BUILD_DIR, GCC_BUILD_DIR};
use crate::core::session::SdkSession;
use crate::error::LaunchError;

/// Compiler toolchain used for a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toolchain {
    /// The default Xtensa/RISC-V GCC toolchain
    #[default]
    Gcc,
    /// esp-clang
    Clang,
}

impl Toolchain {
    /// Toolchain selected by a `--clang` flag
    pub fn from_clang_flag(clang: bool) -> Self {
        if clang {
            Self::Clang
        } else {
            Self::Gcc
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Gcc => "GCC",
            Self::Clang => "Clang",
        }
    }

    /// Build directory relative to the project root
    pub fn build_dir(self) -> &'static str {
        match self {
            Self::Gcc => GCC_BUILD_DIR,
            Self::Clang => CLANG_BUILD_DIR,
        }
    }

    /// The idfmgr command that produces this build
    pub fn build_command(self) -> &'static str {
        match self {
            Self::Gcc => "idfmgr build",
            Self::Clang => "idfmgr build --clang",
        }
    }
}

/// Build options from CLI
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Toolchain to build with
    pub toolchain: Toolchain,
}

impl BuildOptions {
    /// Arguments passed to `idf.py`
    pub fn idf_args(&self) -> Vec<String> {
        match self.toolchain {
            Toolchain::Gcc => vec!["build".to_string()],
            Toolchain::Clang => vec![
                "-DIDF_TOOLCHAIN=clang".to_string(),
                "-B".to_string(),
                CLANG_BUILD_DIR.to_string(),
                "build".to_string(),
            ],
        }
    }
}

/// Build the project in `project_dir`, returning the output directory
pub fn build(
    session: &SdkSession,
    project_dir: &Path,
    options: &BuildOptions,
) -> Result<PathBuf, LaunchError> {
    tracing::info!(
        "Building with {} (ESP-IDF {})",
        options.toolchain.name(),
        session.version
    );
    session.idf(options.idf_args(), project_dir).run_checked()?;
    Ok(project_dir.join(options.toolchain.build_dir()))
}
