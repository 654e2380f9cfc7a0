//! Process launcher
//!
//! [`ScopedCommand`] runs one child process with an explicit environment.
//! The child never sees the parent's environment, always shares the parent's
//! standard streams, and its exit status is reported separately from a
//! failure to start it.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::core::environment::DerivedEnvironment;
use crate::error::LaunchError;

/// An external command with its arguments, environment and working directory
#[derive(Debug, Clone)]
pub struct ScopedCommand {
    program: OsString,
    args: Vec<OsString>,
    env: DerivedEnvironment,
    cwd: Option<PathBuf>,
    label: Option<String>,
}

impl ScopedCommand {
    /// Create a command for `program` with an empty environment
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            env: DerivedEnvironment::new(),
            cwd: None,
            label: None,
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Replace the environment passed to the child
    #[must_use]
    pub fn env(mut self, env: DerivedEnvironment) -> Self {
        self.env = env;
        self
    }

    /// Run the child in `dir`
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Name used for this command in error messages
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// The program as given
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// The arguments as given
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// The environment the child will receive
    pub fn get_env(&self) -> &DerivedEnvironment {
        &self.env
    }

    /// The working directory, if set
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Locate the program using the child's `PATH`
    ///
    /// Programs containing a path separator are resolved against the working
    /// directory instead.
    pub fn resolve_program(&self) -> Result<PathBuf, LaunchError> {
        let cwd = match &self.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| LaunchError::SpawnFailed {
                program: self.display_name(),
                error: e.to_string(),
            })?,
        };

        which::which_in(&self.program, self.env.search_path(), cwd).map_err(|e| {
            tracing::debug!("Lookup of {:?} failed: {e}", self.program);
            LaunchError::NotFound {
                program: self.program.to_string_lossy().into_owned(),
            }
        })
    }

    /// Run the command to completion and return its exit status
    ///
    /// Blocks until the child exits. A child that runs and fails is not an
    /// error here; see [`Self::run_checked`].
    pub fn run(&self) -> Result<ExitStatus, LaunchError> {
        let executable = self.resolve_program()?;

        let mut cmd = Command::new(&executable);
        cmd.args(&self.args)
            .env_clear()
            .envs(self.env.iter())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        tracing::debug!("Running {}", self.command_line());
        cmd.status().map_err(|e| self.spawn_error(&e))
    }

    /// Run the command and treat a non-zero exit as an error
    pub fn run_checked(&self) -> Result<(), LaunchError> {
        let status = self.run()?;
        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::NonZeroExit {
                program: self.display_name(),
                code: status.code(),
            })
        }
    }

    /// Human-readable command line, for logs
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }

    fn spawn_error(&self, error: &io::Error) -> LaunchError {
        if error.kind() == io::ErrorKind::NotFound {
            LaunchError::NotFound {
                program: self.program.to_string_lossy().into_owned(),
            }
        } else {
            LaunchError::SpawnFailed {
                program: self.display_name(),
                error: error.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ambient() -> DerivedEnvironment {
        DerivedEnvironment::from_current_process()
    }

    #[test]
    fn test_builder_collects_parts() {
        let cmd = ScopedCommand::new("python3")
            .arg("idf.py")
            .args(["-B", "build-clang", "build"])
            .current_dir("/tmp");

        assert_eq!(cmd.program(), "python3");
        assert_eq!(cmd.get_args().len(), 4);
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp")));
        assert_eq!(cmd.command_line(), "python3 idf.py -B build-clang build");
    }

    #[test]
    fn test_nonexistent_absolute_program_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("no-such-tool");

        let err = ScopedCommand::new(&missing).env(ambient()).run().unwrap_err();
        assert!(matches!(err, LaunchError::NotFound { .. }), "got {err:?}");
    }

    #[test]
    fn test_program_missing_from_child_path_is_not_found() {
        let err = ScopedCommand::new("definitely-not-a-real-idfmgr-tool")
            .env(ambient())
            .run_checked()
            .unwrap_err();
        assert!(matches!(err, LaunchError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_lookup_uses_child_path_not_parent_path() {
        // `sh` exists on the parent's PATH but the child has no PATH at all.
        let err = ScopedCommand::new("sh").run().unwrap_err();
        assert!(matches!(err, LaunchError::NotFound { .. }));
    }

    #[cfg(windows)]
    #[test]
    fn test_mixed_case_path_is_used_for_lookup() {
        let mut env = DerivedEnvironment::new();
        env.set("Path", &std::env::var("PATH").unwrap_or_default());

        let status = ScopedCommand::new("cmd")
            .args(["/C", "exit 0"])
            .env(env)
            .run()
            .unwrap();
        assert!(status.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        let status = ScopedCommand::new("sh")
            .args(["-c", "exit 3"])
            .env(ambient())
            .run()
            .unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_checked_maps_non_zero_exit() {
        let err = ScopedCommand::new("sh")
            .args(["-c", "exit 7"])
            .env(ambient())
            .label("idf.py")
            .run_checked()
            .unwrap_err();
        match err {
            LaunchError::NonZeroExit { program, code } => {
                assert_eq!(program, "idf.py");
                assert_eq!(code, Some(7));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_child_sees_only_given_environment() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("env.txt");

        let mut env = DerivedEnvironment::new();
        env.set("PATH", &std::env::var("PATH").unwrap_or_default());
        env.set("IDFMGR_MARKER", "scoped");

        ScopedCommand::new("sh")
            .arg("-c")
            .arg(format!("env > '{}'", out.display()))
            .env(env)
            .run_checked()
            .unwrap();

        let dump = std::fs::read_to_string(&out).unwrap();
        let seen = DerivedEnvironment::parse(&dump);
        assert_eq!(seen.get("IDFMGR_MARKER"), Some("scoped"));
        assert_eq!(seen.get("HOME"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_working_directory_is_applied() {
        let temp = TempDir::new().unwrap();
        ScopedCommand::new("sh")
            .args(["-c", "touch here"])
            .env(ambient())
            .current_dir(temp.path())
            .run_checked()
            .unwrap();
        assert!(temp.path().join("here").exists());
    }
}
