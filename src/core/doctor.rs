//! Doctor command logic
//!
//! Checks the host tools ESP-IDF needs and reports issues with suggestions.

use std::path::Path;

use crate::config::defaults::{DERIVATION_SHELL, PREREQUISITES};
use crate::core::context::Context;
use crate::core::install_registry::{is_installed, list_installed};
use crate::core::resolver::resolve_for_project;

/// Result of a single dependency check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the dependency being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version if available
    pub version: Option<String>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
    /// Whether this is a required or optional dependency
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, version: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            version,
            error: None,
            suggestion: None,
            required,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            version: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
            required,
        }
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Project-level issues found
    pub project_issues: Vec<String>,
}

impl DoctorReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check result
    pub fn add_check(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Check if all required checks passed
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Check if all checks passed (including optional)
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed) && self.project_issues.is_empty()
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get all failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .collect()
    }
}

/// Check if a command is available and report its version
pub fn check_command_available(command: &str) -> Option<String> {
    which::which(command).ok()?;
    std::process::Command::new(command)
        .arg("--version")
        .output()
        .ok()
        .map(|output| {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            extract_version(&format!("{stdout}{stderr}")).unwrap_or_default()
        })
}

/// Extract version string from command output
fn extract_version(output: &str) -> Option<String> {
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Host tools from `tools` that are not on `PATH`
pub fn missing_tools(tools: &[&str]) -> Vec<String> {
    tools
        .iter()
        .filter(|tool| which::which(tool).is_err())
        .map(|tool| (*tool).to_string())
        .collect()
}

/// Package-manager command that installs `missing` on this host
pub fn install_suggestion(missing: &[String]) -> String {
    let packages = missing.join(" ");
    let has = |tool: &str| which::which(tool).is_ok();

    if cfg!(target_os = "macos") {
        if has("brew") {
            format!("brew install {packages}")
        } else {
            format!("Install Homebrew first (https://brew.sh), then: brew install {packages}")
        }
    } else if cfg!(windows) {
        "Install using chocolatey, winget, or download manually".to_string()
    } else if has("apt-get") {
        format!("sudo apt-get install {packages}")
    } else if has("yum") {
        format!("sudo yum install {packages}")
    } else if has("pacman") {
        format!("sudo pacman -S {packages}")
    } else {
        "Install using your distribution's package manager".to_string()
    }
}

/// Check one prerequisite tool
pub fn check_tool(tool: &str, required: bool) -> CheckResult {
    match check_command_available(tool) {
        Some(version) => {
            let version = (!version.is_empty()).then_some(version);
            CheckResult::pass(tool, version, required)
        }
        None => CheckResult::fail(
            tool,
            &format!("{tool} not found in PATH"),
            Some(&install_suggestion(&[tool.to_string()])),
            required,
        ),
    }
}

/// Check that at least one ESP-IDF version is installed
pub fn check_installations(ctx: &Context) -> CheckResult {
    let name = "ESP-IDF installations";
    match list_installed(ctx.install_root()) {
        Ok(versions) if !versions.is_empty() => {
            CheckResult::pass(name, versions.last().cloned(), false)
        }
        Ok(_) => CheckResult::fail(
            name,
            &format!("No versions installed in {}", ctx.install_root().display()),
            Some("idfmgr install latest"),
            false,
        ),
        Err(e) => CheckResult::fail(name, &e.to_string(), None, false),
    }
}

/// Problems with the project in `project_dir`, if it is one
pub fn check_project(ctx: &Context, project_dir: &Path) -> Vec<String> {
    if !project_dir.join(crate::config::defaults::VERSION_MARKER).exists() {
        return Vec::new();
    }
    match resolve_for_project(project_dir) {
        Ok(version) if is_installed(ctx.install_root(), &version) => Vec::new(),
        Ok(version) => vec![format!(
            "Project uses ESP-IDF {version}, which is not installed. Install it with: idfmgr install {version}"
        )],
        Err(e) => vec![e.to_string()],
    }
}

/// Run all doctor checks
pub fn run_doctor(ctx: &Context, project_dir: Option<&Path>) -> DoctorReport {
    let mut report = DoctorReport::new();

    for tool in PREREQUISITES {
        report.add_check(check_tool(tool, true));
    }
    if !cfg!(windows) {
        report.add_check(check_tool(DERIVATION_SHELL, true));
    }
    report.add_check(check_installations(ctx));

    if let Some(dir) = project_dir {
        report.project_issues = check_project(ctx, dir);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_result_pass() {
        let result = CheckResult::pass("git", Some("2.39.0".to_string()), true);
        assert!(result.passed);
        assert_eq!(result.version, Some("2.39.0".to_string()));
        assert!(result.required);
    }

    #[test]
    fn test_check_result_fail() {
        let result = CheckResult::fail("ninja", "error", Some("suggestion"), true);
        assert!(!result.passed);
        assert_eq!(result.error, Some("error".to_string()));
        assert_eq!(result.suggestion, Some("suggestion".to_string()));
    }

    #[test]
    fn test_doctor_report_counts() {
        let mut report = DoctorReport::new();
        report.add_check(CheckResult::pass("git", None, true));
        report.add_check(CheckResult::fail("ninja", "err", None, true));
        report.add_check(CheckResult::pass("installs", None, false));

        assert_eq!(report.passed_count(), 2);
        assert_eq!(report.failed_required().len(), 1);
        assert!(!report.all_passed());
        assert!(!report.all_required_passed());
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version("cmake version 3.28.1"), Some("3.28.1".to_string()));
        assert_eq!(extract_version("git version 2.39.0"), Some("2.39.0".to_string()));
        assert_eq!(extract_version("Python 3.11.4"), Some("3.11.4".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_tools_reports_only_absent() {
        let missing = missing_tools(&["idfmgr-no-such-tool", "sh"]);
        assert_eq!(missing, vec!["idfmgr-no-such-tool"]);
    }

    #[test]
    fn test_suggestion_names_packages() {
        let hint = install_suggestion(&["ninja".to_string(), "cmake".to_string()]);
        assert!(!hint.is_empty());
    }

    #[test]
    fn test_empty_install_root_fails_installation_check() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::with_install_root(temp.path());
        let check = check_installations(&ctx);
        assert!(!check.passed);
        assert!(!check.required);
        assert_eq!(check.suggestion.as_deref(), Some("idfmgr install latest"));
    }

    #[test]
    fn test_project_bound_to_missing_version_is_an_issue() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::with_install_root(temp.path().join("esp"));
        assert!(check_project(&ctx, temp.path()).is_empty());

        std::fs::write(temp.path().join(".espidf-version"), "v5.1.2\n").unwrap();
        let issues = check_project(&ctx, temp.path());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("idfmgr install v5.1.2"));
    }
}
