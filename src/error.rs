//! Error types for idfmgr
//!
//! Domain-specific error types using thiserror. Each component returns its
//! own enum; [`IdfmgrError`] collects them for callers that span components.

use std::path::PathBuf;
use thiserror::Error;

pub use crate::core::global_config::GlobalConfigError;

/// Install registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The install root exists but could not be scanned
    #[error("Failed to read install root '{path}': {error}")]
    UnreadableRoot { path: PathBuf, error: String },
}

/// Environment derivation errors
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// Activation script missing from the installation
    #[error("Environment derivation failed for '{path}': activation script not found")]
    ScriptMissing { path: PathBuf },

    /// The derivation subshell could not be started
    #[error("Environment derivation failed for '{path}': could not start {shell}: {error}")]
    ShellUnavailable {
        path: PathBuf,
        shell: String,
        error: String,
    },

    /// The activation script (or the environment dump) exited non-zero
    #[error("Environment derivation failed for '{path}': activation script exited with {status}")]
    ScriptFailed { path: PathBuf, status: String },
}

/// Version resolution errors
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No `.espidf-version` in the working directory
    #[error("{path} not found. Are you in an ESP-IDF project directory?")]
    NoProjectMarker { path: PathBuf },

    /// The marker file exists but could not be read
    #[error("Failed to read '{path}': {error}")]
    MarkerUnreadable { path: PathBuf, error: String },

    /// The marker file holds no version
    #[error("'{path}' does not contain a version")]
    EmptyMarker { path: PathBuf },

    /// The requested version is not a valid installation
    #[error("ESP-IDF version {version} is not installed. Install it with: idfmgr install {version}")]
    NotInstalled { version: String },

    /// The install root holds no valid installation
    #[error("No ESP-IDF versions installed. Install one with: idfmgr install latest")]
    NoVersionsInstalled,

    /// Registry failure while resolving
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Process launch errors
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The executable could not be located
    #[error("Executable not found: {program}")]
    NotFound { program: String },

    /// The executable was found but could not be started
    #[error("Failed to start '{program}': {error}")]
    SpawnFailed { program: String, error: String },

    /// The child ran and exited unsuccessfully
    #[error("'{program}' exited with {}", describe_code(*code))]
    NonZeroExit { program: String, code: Option<i32> },
}

impl LaunchError {
    /// Exit code the parent process should terminate with
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NonZeroExit {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Release listing errors
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Network failure talking to the release service
    #[error("Release service unavailable ({url}): {error}")]
    Unavailable { url: String, error: String },

    /// The service answered with a non-success status
    #[error("Release service returned status {status} for {url}")]
    BadStatus { url: String, status: u16 },

    /// The response body was not the expected JSON
    #[error("Failed to parse release data from {url}: {error}")]
    Parse { url: String, error: String },
}

/// Installation errors
#[derive(Error, Debug)]
pub enum InstallError {
    /// Required host tools are missing
    #[error("Missing prerequisites: {}", missing.join(", "))]
    MissingPrerequisites { missing: Vec<String> },

    /// The vendor install script is absent from the clone
    #[error("Install script not found: {path}")]
    ScriptNotFound { path: PathBuf },

    /// A tool helper script is absent from the clone
    #[error("'{tool}' not found at {path}")]
    ToolNotFound { tool: String, path: PathBuf },
}

/// Project errors
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Flashing needs an existing build
    #[error("{build_dir} build directory not found. Build first with: {command}")]
    NotBuilt { build_dir: String, command: String },

    /// The project directory is already taken
    #[error("Project directory already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// The generated project has no main source file
    #[error("Could not find main source file in {path}")]
    MainSourceMissing { path: PathBuf },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to rename a file
    #[error("Failed to rename '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Top-level idfmgr error type
#[derive(Error, Debug)]
pub enum IdfmgrError {
    /// Global config error
    #[error(transparent)]
    Config(#[from] GlobalConfigError),

    /// Registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Environment error
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// Resolver error
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Launch error
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Release listing error
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// Install error
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Project error
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}
