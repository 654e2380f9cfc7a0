//! Default configuration values

/// Project marker file recording the bound ESP-IDF version
pub const VERSION_MARKER: &str = ".espidf-version";

/// Environment variable overriding the install root
pub const ENV_INSTALL_ROOT: &str = "ESP_BASE";

/// Install root directory name under the user's home directory
pub const INSTALL_ROOT_DIR: &str = ".esp";

/// Entries an installation directory must contain to be recognized
pub const REQUIRED_MARKERS: [&str; 3] = [TOOLS_DIR, COMPONENTS_DIR, EXPORT_SCRIPT];

/// Tool directory inside an installation
pub const TOOLS_DIR: &str = "tools";

/// Component directory inside an installation
pub const COMPONENTS_DIR: &str = "components";

/// Activation script sourced on Unix
pub const EXPORT_SCRIPT: &str = "export.sh";

/// Activation script run on Windows
pub const EXPORT_BATCH: &str = "export.bat";

/// Vendor install script run after cloning
#[cfg(windows)]
pub const INSTALL_SCRIPT: &str = "install.bat";

/// Vendor install script run after cloning
#[cfg(not(windows))]
pub const INSTALL_SCRIPT: &str = "install.sh";

/// Shell used to source the activation script
pub const DERIVATION_SHELL: &str = "bash";

/// Python interpreter used to run `idf.py`
#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";

/// Python interpreter used to run `idf.py`
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

/// Default chip target for new projects and vendor install scripts
pub const DEFAULT_TARGET: &str = "esp32";

/// Build directory for GCC builds
pub const GCC_BUILD_DIR: &str = "build";

/// Build directory for Clang builds
pub const CLANG_BUILD_DIR: &str = "build-clang";

/// Number of releases shown by `idfmgr list`
pub const RELEASE_LIST_LIMIT: usize = 20;

/// Host tools required before installing
pub const PREREQUISITES: [&str; 5] = ["git", "wget", "python3", "cmake", "ninja"];

/// Variable prefixes left behind by a previously activated ESP-IDF
pub const STALE_VAR_PREFIXES: [&str; 2] = ["IDF_", "ESP_IDF_"];

/// Individual variables left behind by a previously activated ESP-IDF
pub const STALE_VARS: [&str; 1] = ["OPENOCD_SCRIPTS"];
