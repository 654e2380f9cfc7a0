//! Derived environment
//!
//! An ordered set of environment variables captured from an activation
//! script, plus the parsing and shell rendering rules that go with it.

use std::ffi::OsString;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::defaults::{STALE_VARS, STALE_VAR_PREFIXES};

/// Name of the search path variable
pub const PATH_VAR: &str = "PATH";

/// Identifier grammar for variable names
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid name pattern"))
}

/// Check whether `name` is a syntactically valid variable name
pub fn is_valid_name(name: &str) -> bool {
    name_pattern().is_match(name)
}

/// Whether two variable names refer to the same variable
///
/// Windows treats names case-insensitively, so `Path` and `PATH` match there.
fn same_name(a: &str, b: &str) -> bool {
    if cfg!(windows) {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Quote `value` for a POSIX shell using single quotes
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Environment variables for one child invocation
///
/// Insertion order is kept; setting an existing name replaces its value in
/// place. Names given to [`Self::set`] or parsed from a dump satisfy
/// [`is_valid_name`]; a host snapshot keeps the host's names as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedEnvironment {
    vars: Vec<(String, String)>,
}

impl DerivedEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `env` dump into records
    ///
    /// Each line is split at the first `=`. Lines without a separator or
    /// whose name fails the identifier grammar are dropped.
    pub fn parse(dump: &str) -> Self {
        let mut env = Self::new();
        for line in dump.lines() {
            let Some((name, value)) = line.split_once('=') else {
                continue;
            };
            if !env.set(name, value) {
                tracing::trace!("Dropping environment line with invalid name: {name:?}");
            }
        }
        env
    }

    /// Snapshot of the current process environment
    ///
    /// Variables that are not valid UTF-8 are skipped.
    pub fn from_current_process() -> Self {
        Self::from_host_vars(std::env::vars_os())
    }

    /// Snapshot of host variables, kept without the identifier grammar
    ///
    /// Host names such as `ProgramFiles(x86)` are passed through to child
    /// tools untouched. Empty names and the drive-letter entries Windows
    /// stores as `=C:` are skipped.
    pub(crate) fn from_host_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = Self::new();
        for (name, value) in vars {
            let (Ok(name), Ok(value)) = (name.into_string(), value.into_string()) else {
                continue;
            };
            if name.is_empty() || name.starts_with('=') {
                continue;
            }
            env.insert(&name, &value);
        }
        env
    }

    /// Set a variable, returning `false` if the name is rejected
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        if !is_valid_name(name) {
            return false;
        }
        self.insert(name, value);
        true
    }

    fn insert(&mut self, name: &str, value: &str) {
        match self
            .vars
            .iter_mut()
            .find(|(existing, _)| same_name(existing, name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.vars.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove a variable
    pub fn remove(&mut self, name: &str) {
        self.vars.retain(|(existing, _)| !same_name(existing, name));
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(existing, _)| same_name(existing, name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the environment is empty
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The `PATH` value as an OS string, for program lookup
    pub fn search_path(&self) -> Option<OsString> {
        self.get(PATH_VAR).map(OsString::from)
    }

    /// Drop state left behind by a previously activated ESP-IDF
    ///
    /// Removes `IDF_*`, `ESP_IDF_*` and related variables, and strips `PATH`
    /// entries that live under `install_root`.
    pub fn scrub_activation_state(&mut self, install_root: &Path) {
        self.vars.retain(|(name, _)| {
            !STALE_VAR_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
                && !STALE_VARS.contains(&name.as_str())
        });

        let Some(path) = self.get(PATH_VAR) else {
            return;
        };
        let kept: Vec<_> = std::env::split_paths(path)
            .filter(|entry| !entry.starts_with(install_root))
            .collect();
        match std::env::join_paths(kept) {
            Ok(joined) => {
                let joined = joined.to_string_lossy().into_owned();
                self.set(PATH_VAR, &joined);
            }
            Err(e) => tracing::warn!("Leaving PATH untouched: {e}"),
        }
    }

    /// Render `export NAME='value'` lines for evaluation by a POSIX shell
    pub fn render_exports(&self) -> String {
        self.iter()
            .filter(|(name, _)| is_valid_name(name))
            .map(|(name, value)| format!("export {name}={}\n", shell_quote(value)))
            .collect()
    }
}
