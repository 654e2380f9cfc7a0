//! Environment derivation
//!
//! Turns an installation into the environment its tools need. How that
//! happens is a platform capability, modelled by [`ActivationProvider`]:
//!
//! - [`SubshellCapture`] (Unix) sources `export.sh` in a `bash` subshell and
//!   captures the resulting variables.
//! - [`InteractiveHandoff`] (Windows) only checks that `export.bat` exists;
//!   the script runs inside each child's own `cmd` shell.
//!
//! [`platform_provider`] picks one at compile time.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::defaults::DERIVATION_SHELL;
use crate::core::environment::DerivedEnvironment;
use crate::core::install_registry::Installation;
use crate::error::EnvironmentError;
use crate::infra::launcher::ScopedCommand;

/// Sources the script given as `$1`, discarding its output, then dumps the
/// resulting environment.
const CAPTURE_SCRIPT: &str = r#"source "$1" >/dev/null 2>&1 && env"#;

/// Result of activating an installation
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Variables captured from the activation script
    Captured(DerivedEnvironment),
    /// The activation script runs in front of every child command
    Deferred {
        /// Batch script to run first
        script: PathBuf,
        /// Environment handed to the wrapping shell
        ambient: DerivedEnvironment,
    },
}

impl Activation {
    /// Environment the child process receives
    pub fn environment(&self) -> &DerivedEnvironment {
        match self {
            Self::Captured(env) => env,
            Self::Deferred { ambient, .. } => ambient,
        }
    }

    /// Build a command that runs `program` inside this activation
    pub fn command<I, S>(&self, program: impl AsRef<OsStr>, args: I) -> ScopedCommand
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        match self {
            Self::Captured(env) => ScopedCommand::new(program).args(args).env(env.clone()),
            Self::Deferred { script, ambient } => ScopedCommand::new("cmd")
                .args([
                    OsStr::new("/C"),
                    OsStr::new("call"),
                    script.as_os_str(),
                    OsStr::new("&&"),
                ])
                .arg(program)
                .args(args)
                .env(ambient.clone()),
        }
    }

    /// Interactive shell with the activation applied, when the platform
    /// cannot export variables into the calling shell
    pub fn interactive_shell(&self, working_dir: &Path) -> Option<ScopedCommand> {
        match self {
            Self::Captured(_) => None,
            Self::Deferred { script, ambient } => Some(
                ScopedCommand::new("powershell.exe")
                    .args(["-NoExit", "-Command"])
                    .arg(format!("cmd /c \"{} && powershell\"", script.display()))
                    .env(ambient.clone())
                    .current_dir(working_dir)
                    .label("powershell"),
            ),
        }
    }
}

/// Platform capability that activates an installation
pub trait ActivationProvider {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Produce the activation for `installation`
    fn activate(&self, installation: &Installation) -> Result<Activation, EnvironmentError>;
}

/// Captures variables by sourcing `export.sh` in a subshell
#[derive(Debug, Clone)]
pub struct SubshellCapture {
    shell: String,
    install_root: Option<PathBuf>,
}

impl SubshellCapture {
    /// Capture with `bash`, scrubbing state from installs under `install_root`
    pub fn new(install_root: &Path) -> Self {
        Self {
            shell: DERIVATION_SHELL.to_string(),
            install_root: Some(install_root.to_path_buf()),
        }
    }

    /// Use a different shell for sourcing
    #[must_use]
    pub fn with_shell(mut self, shell: &str) -> Self {
        self.shell = shell.to_string();
        self
    }

    /// Run the activation script of the installation at `install_path` and
    /// capture the environment it leaves behind
    ///
    /// Only the final `env` dump is kept; the script's own output is
    /// discarded. Lines whose name fails the identifier grammar are dropped.
    pub fn derive_environment(
        &self,
        install_path: &Path,
    ) -> Result<DerivedEnvironment, EnvironmentError> {
        let script = install_path.join(crate::config::defaults::EXPORT_SCRIPT);
        if !script.is_file() {
            return Err(EnvironmentError::ScriptMissing { path: script });
        }

        let mut ambient = DerivedEnvironment::from_current_process();
        if let Some(root) = &self.install_root {
            ambient.scrub_activation_state(root);
        }

        tracing::debug!("Sourcing {} with {}", script.display(), self.shell);
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(CAPTURE_SCRIPT)
            .arg(&self.shell)
            .arg(&script)
            .env_clear()
            .envs(ambient.iter())
            .current_dir(install_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| EnvironmentError::ShellUnavailable {
                path: install_path.to_path_buf(),
                shell: self.shell.clone(),
                error: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                tracing::debug!("Derivation stderr: {}", stderr.trim());
            }
            return Err(EnvironmentError::ScriptFailed {
                path: install_path.to_path_buf(),
                status: output.status.to_string(),
            });
        }

        let env = DerivedEnvironment::parse(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!("Captured {} variables from {}", env.len(), script.display());
        Ok(env)
    }
}

impl ActivationProvider for SubshellCapture {
    fn name(&self) -> &'static str {
        "subshell-capture"
    }

    fn activate(&self, installation: &Installation) -> Result<Activation, EnvironmentError> {
        self.derive_environment(&installation.path)
            .map(Activation::Captured)
    }
}

/// Hands activation to the child's own shell
#[derive(Debug, Clone, Default)]
pub struct InteractiveHandoff;

impl ActivationProvider for InteractiveHandoff {
    fn name(&self) -> &'static str {
        "interactive-handoff"
    }

    fn activate(&self, installation: &Installation) -> Result<Activation, EnvironmentError> {
        let script = installation.export_batch();
        if !script.is_file() {
            return Err(EnvironmentError::ScriptMissing { path: script });
        }
        Ok(Activation::Deferred {
            script,
            ambient: DerivedEnvironment::from_current_process(),
        })
    }
}

/// The activation provider for the platform this binary was built for
#[cfg(windows)]
pub fn platform_provider(_install_root: &Path) -> Box<dyn ActivationProvider> {
    Box::new(InteractiveHandoff)
}

/// The activation provider for the platform this binary was built for
#[cfg(not(windows))]
pub fn platform_provider(install_root: &Path) -> Box<dyn ActivationProvider> {
    Box::new(SubshellCapture::new(install_root))
}
