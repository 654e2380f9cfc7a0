//! Installation logic
//!
//! Installs one ESP-IDF version into the install root: a shallow recursive
//! clone of the release tag, the vendor install script, and optionally the
//! esp-clang toolchain. Resolving `latest` to a tag happens before this
//! module is involved.

use std::path::{Path, PathBuf};

use crate::config::defaults::{INSTALL_SCRIPT, PREREQUISITES};
use crate::config::urls::ESP_IDF_REPO;
use crate::core::context::Context;
use crate::core::doctor::{install_suggestion, missing_tools};
use crate::core::environment::DerivedEnvironment;
use crate::core::install_registry::Installation;
use crate::error::{IdfmgrError, InstallError};
use crate::infra::filesystem::create_dir_all;
use crate::infra::launcher::ScopedCommand;

/// Version keyword resolved through the release service
pub const LATEST: &str = "latest";

/// Install options from CLI
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Skip the host tool check
    pub skip_prereqs: bool,
    /// Skip the esp-clang toolchain
    pub skip_clang: bool,
}

/// Outcome of an install
#[derive(Debug)]
pub enum InstallOutcome {
    /// The version directory already existed; nothing was done
    AlreadyPresent(PathBuf),
    /// The version was installed
    Installed {
        /// Installation directory
        path: PathBuf,
        /// Why esp-clang could not be installed, if it was attempted and failed
        clang_warning: Option<String>,
    },
}

/// Fail with the missing host tools, if any
pub fn check_prerequisites() -> Result<(), InstallError> {
    let missing = missing_tools(&PREREQUISITES);
    if missing.is_empty() {
        return Ok(());
    }
    tracing::warn!("Install them with: {}", install_suggestion(&missing));
    Err(InstallError::MissingPrerequisites { missing })
}

fn host_command(program: &str) -> ScopedCommand {
    ScopedCommand::new(program).env(DerivedEnvironment::from_current_process())
}

/// `git clone` of the release tag into `dest`
pub fn clone_command(version: &str, dest: &Path) -> ScopedCommand {
    host_command("git")
        .args(["clone", "-b", version, "--recursive", "--depth", "1", ESP_IDF_REPO])
        .arg(dest)
}

/// The vendor install script for `target`
pub fn install_script_command(
    install: &Installation,
    target: &str,
) -> Result<ScopedCommand, InstallError> {
    let script = install.path.join(INSTALL_SCRIPT);
    if !script.is_file() {
        return Err(InstallError::ScriptNotFound { path: script });
    }
    Ok(host_command(&script.to_string_lossy())
        .arg(target)
        .current_dir(&install.path)
        .label(INSTALL_SCRIPT))
}

/// `idf_tools.py install esp-clang`
pub fn clang_command(ctx: &Context, install: &Installation) -> Result<ScopedCommand, InstallError> {
    let tools = install.idf_tools_py();
    if !tools.is_file() {
        return Err(InstallError::ToolNotFound {
            tool: "idf_tools.py".to_string(),
            path: tools,
        });
    }
    Ok(host_command(ctx.python())
        .arg(&tools)
        .args(["install", "esp-clang"])
        .current_dir(&install.path)
        .label("idf_tools.py"))
}

fn install_clang(ctx: &Context, install: &Installation) -> Result<(), IdfmgrError> {
    if let Err(e) = host_command("pip3")
        .args(["install", "-U", "pyclang"])
        .run_checked()
    {
        tracing::warn!("Failed to install pyclang via pip3: {e}");
    }
    clang_command(ctx, install)?.run_checked()?;
    Ok(())
}

/// Install `version` under the install root
pub fn install_version(
    ctx: &Context,
    version: &str,
    options: &InstallOptions,
) -> Result<InstallOutcome, IdfmgrError> {
    let install = Installation::new(ctx.install_root(), version);
    if install.path.exists() {
        return Ok(InstallOutcome::AlreadyPresent(install.path));
    }

    if !options.skip_prereqs {
        check_prerequisites()?;
    }

    create_dir_all(ctx.install_root())?;

    tracing::info!("Cloning ESP-IDF {version}");
    clone_command(version, &install.path).run_checked()?;

    tracing::info!("Running ESP-IDF install script");
    install_script_command(&install, ctx.default_target())?.run_checked()?;

    let clang_warning = if options.skip_clang {
        None
    } else {
        tracing::info!("Installing esp-clang");
        install_clang(ctx, &install).err().map(|e| e.to_string())
    };

    Ok(InstallOutcome::Installed {
        path: install.path,
        clang_warning,
    })
}
