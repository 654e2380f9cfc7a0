//! Common test utilities and helpers
//!
//! Integration tests run the real `idfmgr` binary against a temporary
//! install root holding fake ESP-IDF installations. The fake `idf.py` is a
//! POSIX shell script run through `sh`, which the config file names as the
//! Python interpreter.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Stand-in for `tools/idf.py`
///
/// Records every invocation in `<install>/idf-calls.log`, prints the
/// variables the activation script set, and creates a minimal skeleton for
/// `create-project`. `fail <code>` exits with `<code>`.
const FAKE_IDF_PY: &str = r##"log="$(dirname "$0")/../idf-calls.log"
echo "$*" >> "$log"
echo "IDF_PATH=$IDF_PATH"
echo "FAKE_MARKER=$IDFMGR_FAKE_MARKER"
case "$1" in
  create-project)
    mkdir -p "$2/main"
    printf 'cmake_minimum_required(VERSION 3.16)\ninclude($ENV{IDF_PATH}/tools/cmake/project.cmake)\nproject(%s)\n' "$2" > "$2/CMakeLists.txt"
    printf 'idf_component_register(SRCS "%s.c"\n                    INCLUDE_DIRS ".")\n' "$2" > "$2/main/CMakeLists.txt"
    echo 'void app_main(void) {}' > "$2/main/$2.c"
    ;;
  fail)
    exit "$2"
    ;;
esac
"##;

/// Test environment: an install root, a config dir and a project dir
pub struct TestEnv {
    /// Temporary directory holding everything
    pub dir: TempDir,
}

impl TestEnv {
    /// Create a new environment with `python = "sh"` configured
    pub fn new() -> Self {
        let env = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        std::fs::create_dir_all(env.install_root()).expect("Failed to create install root");
        std::fs::create_dir_all(env.project()).expect("Failed to create project dir");
        env.create_file("config/config.toml", "python = \"sh\"\n");
        env
    }

    /// Install root passed through `ESP_BASE`
    pub fn install_root(&self) -> PathBuf {
        self.dir.path().join("esp")
    }

    /// Config directory passed through `IDFMGR_CONFIG_DIR`
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Working directory for commands
    pub fn project(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    /// Create a file relative to the temporary directory
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Bind the project directory to `version`
    pub fn bind_project(&self, version: &str) {
        self.create_file("project/.espidf-version", &format!("{version}\n"));
    }

    /// Create a fake installation of `version` and return its path
    pub fn fake_install(&self, version: &str) -> PathBuf {
        let install = self.install_root().join(version);
        std::fs::create_dir_all(install.join("components")).expect("Failed to create components");
        std::fs::create_dir_all(install.join("tools")).expect("Failed to create tools");
        std::fs::write(install.join("tools/idf.py"), FAKE_IDF_PY).expect("Failed to write idf.py");
        std::fs::write(
            install.join("export.sh"),
            format!(
                "export IDF_PATH=\"{}\"\nexport IDFMGR_FAKE_MARKER=\"{version}\"\nexport PATH=\"$IDF_PATH/tools:$PATH\"\n",
                install.display()
            ),
        )
        .expect("Failed to write export.sh");
        install
    }

    /// Arguments `idf.py` was called with, one invocation per line
    pub fn idf_calls(&self, version: &str) -> Vec<String> {
        let log = self.install_root().join(version).join("idf-calls.log");
        std::fs::read_to_string(log)
            .map(|content| content.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Base command with the environment overrides applied
    pub fn command(&self, cwd: &Path) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_idfmgr"));
        cmd.current_dir(cwd)
            .env("ESP_BASE", self.install_root())
            .env("IDFMGR_CONFIG_DIR", self.config_dir())
            .env_remove("IDF_PATH")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run `idfmgr <args>` in the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(&self.project())
            .args(args)
            .output()
            .expect("Failed to execute idfmgr")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
