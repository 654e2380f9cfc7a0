//! SDK session
//!
//! Runs the resolve, validate and derive stages once, then builds commands
//! that execute inside the resulting environment.

use std::ffi::OsStr;
use std::path::Path;

use crate::core::activation::{platform_provider, Activation, ActivationProvider};
use crate::core::context::Context;
use crate::core::install_registry::Installation;
use crate::core::resolver::{locate, resolve_for_project};
use crate::error::IdfmgrError;
use crate::infra::launcher::ScopedCommand;

/// An activated ESP-IDF installation
#[derive(Debug, Clone)]
pub struct SdkSession {
    /// Resolved version identifier
    pub version: String,
    /// Installation the version lives in
    pub installation: Installation,
    /// Environment for child tools
    pub activation: Activation,
    python: String,
}

impl SdkSession {
    /// Open the version bound to the project in `project_dir`
    pub fn for_project(ctx: &Context, project_dir: &Path) -> Result<Self, IdfmgrError> {
        let version = resolve_for_project(project_dir)?;
        Self::for_version(ctx, &version)
    }

    /// Open an explicit version
    pub fn for_version(ctx: &Context, version: &str) -> Result<Self, IdfmgrError> {
        let provider = platform_provider(ctx.install_root());
        Self::open_with(ctx, version, provider.as_ref())
    }

    /// Open a version with a specific activation provider
    pub fn open_with(
        ctx: &Context,
        version: &str,
        provider: &dyn ActivationProvider,
    ) -> Result<Self, IdfmgrError> {
        let installation = locate(ctx.install_root(), version)?;
        tracing::debug!(
            "Activating {} with {}",
            installation.path.display(),
            provider.name()
        );
        let activation = provider.activate(&installation)?;

        Ok(Self {
            version: version.to_string(),
            installation,
            activation,
            python: ctx.python().to_string(),
        })
    }

    /// `idf.py <args>` run from `cwd`
    pub fn idf<I, S>(&self, args: I, cwd: &Path) -> ScopedCommand
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.python_script(&self.installation.idf_py(), args, cwd)
            .label("idf.py")
    }

    /// Run a python helper shipped with the installation
    pub fn python_script<I, S>(&self, script: &Path, args: I, cwd: &Path) -> ScopedCommand
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let script_args = std::iter::once(script.as_os_str().to_os_string())
            .chain(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self.activation
            .command(&self.python, script_args)
            .current_dir(cwd)
    }
}
