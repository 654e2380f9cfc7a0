//! Project scaffolding
//!
//! Creates a project with `idf.py create-project`, binds it to the ESP-IDF
//! version used, and rewrites the generated skeleton into the layout idfmgr
//! projects share: a `main` project name, `main/main.c`, editor and
//! sdkconfig defaults, and a git repository. Arduino projects additionally
//! pull in arduino-esp32 as a component.

use std::path::{Path, PathBuf};

use crate::config::urls::ARDUINO_ESP32_REPO;
use crate::core::context::Context;
use crate::core::environment::DerivedEnvironment;
use crate::core::resolver::{resolve_for_new_project, write_project_marker};
use crate::core::session::SdkSession;
use crate::error::{IdfmgrError, ProjectError};
use crate::infra::filesystem::{edit_file, rename, write_file};
use crate::infra::launcher::ScopedCommand;

/// Line in the root `CMakeLists.txt` that pulls in the ESP-IDF build system
const PROJECT_INCLUDE: &str = "include($ENV{IDF_PATH}/tools/cmake/project.cmake)";

/// Where the arduino-esp32 submodule lives inside a project
const ARDUINO_COMPONENT_DIR: &str = "components/arduino";

const ARDUINO_MAIN: &str = r#"#include "Arduino.h"

extern "C" void app_main()
{
    initArduino();

    // Arduino-like setup()
    Serial.begin(115200);
    while (!Serial) {
        ; // wait for serial port to connect
    }

    // Arduino-like loop()
    while (true) {
        Serial.println("loop");
        delay(1000);
    }

    // WARNING: if program reaches end of function app_main() the MCU will restart.
}
"#;

/// Options for creating a project
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Project (and directory) name
    pub name: String,
    /// Set the project up as an Arduino component project
    pub arduino: bool,
    /// Requested ESP-IDF version; latest installed when absent
    pub version: Option<String>,
    /// Chip target
    pub target: String,
}

/// Result of creating a project
#[derive(Debug)]
pub struct CreateResult {
    /// Project directory
    pub path: PathBuf,
    /// ESP-IDF version the project is bound to
    pub version: String,
}

/// Generate `.gitignore` content
pub fn generate_gitignore_content() -> String {
    r".cache/
build/
build-clang/
sdkconfig
sdkconfig.old
*.bin
*.elf
*.map
managed_components/
dependencies.lock
warnings.txt
"
    .to_string()
}

/// Generate `.clangd` content pointing clangd at the Clang build
pub fn generate_clangd_content(arduino: bool) -> String {
    let mut content = String::from(
        r"CompileFlags:
  CompilationDatabase: build-clang
  Remove:
    -fno-shrink-wrap
    -fno-tree-switch-conversion
    -fstrict-volatile-bitfields
    -mtext-section-literals
    -mdisable-hardware-atomics
    -mlongcalls
",
    );
    if arduino {
        content.push_str("  Add:\n    -I./components/arduino\n");
    }
    content
}

/// Generate `sdkconfig.defaults` content
pub fn generate_sdkconfig_defaults(target: &str) -> String {
    format!(
        r#"# Target configuration
CONFIG_IDF_TARGET="{target}"

# Other defaults
CONFIG_AUTOSTART_ARDUINO=n
CONFIG_FREERTOS_HZ=1000
"#
    )
}

/// Rename the CMake project to `main`
pub fn rename_cmake_project(content: &str, name: &str) -> String {
    content.replace(&format!("project({name})"), "project(main)")
}

/// Register the arduino component directory ahead of the project include
pub fn add_arduino_component_dir(content: &str) -> String {
    let mut inserted = false;
    content
        .split('\n')
        .flat_map(|line| {
            if !inserted && line.contains(PROJECT_INCLUDE) {
                inserted = true;
                vec!["set(EXTRA_COMPONENT_DIRS components/arduino)", line]
            } else {
                vec![line]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Make the main component depend on arduino
pub fn require_arduino(content: &str) -> String {
    if content.contains("REQUIRES") {
        content.replace("REQUIRES", "REQUIRES arduino")
    } else {
        content.replace(
            "INCLUDE_DIRS \".\")",
            "INCLUDE_DIRS \".\"\n                    REQUIRES arduino)",
        )
    }
}

/// Apply the edits every new project gets
pub fn apply_common_edits(project: &Path, options: &CreateOptions) -> Result<(), IdfmgrError> {
    write_file(&project.join(".gitignore"), &generate_gitignore_content())?;
    write_file(
        &project.join(".clangd"),
        &generate_clangd_content(options.arduino),
    )?;
    write_file(
        &project.join("sdkconfig.defaults"),
        &generate_sdkconfig_defaults(&options.target),
    )?;
    edit_file(&project.join("CMakeLists.txt"), |c| {
        rename_cmake_project(c, &options.name)
    })?;
    rename_main_source(project, &options.name)?;
    Ok(())
}

/// Move `main/<name>.c` to `main/main.c`
fn rename_main_source(project: &Path, name: &str) -> Result<(), IdfmgrError> {
    let main_dir = project.join("main");
    let generated = main_dir.join(format!("{name}.c"));
    let renamed = main_dir.join("main.c");

    if generated.exists() {
        rename(&generated, &renamed)?;
    } else if !renamed.exists() {
        return Err(ProjectError::MainSourceMissing { path: main_dir }.into());
    }

    let source = format!("{name}.c");
    edit_file(&main_dir.join("CMakeLists.txt"), |c| {
        c.replace(&source, "main.c")
    })?;
    Ok(())
}

/// Apply the Arduino edits after the submodule is in place
pub fn apply_arduino_edits(project: &Path) -> Result<(), IdfmgrError> {
    edit_file(&project.join("CMakeLists.txt"), add_arduino_component_dir)?;

    let main_cmake = project.join("main").join("CMakeLists.txt");
    edit_file(&main_cmake, require_arduino)?;

    let main_c = project.join("main").join("main.c");
    let main_cpp = project.join("main").join("main.cpp");
    rename(&main_c, &main_cpp)?;
    write_file(&main_cpp, ARDUINO_MAIN)?;
    edit_file(&main_cmake, |c| c.replace("main.c", "main.cpp"))?;
    Ok(())
}

fn git(project: &Path) -> ScopedCommand {
    ScopedCommand::new("git")
        .env(DerivedEnvironment::from_current_process())
        .current_dir(project)
}

/// Create a project named `options.name` inside `parent_dir`
pub fn create_project(
    ctx: &Context,
    parent_dir: &Path,
    options: &CreateOptions,
) -> Result<CreateResult, IdfmgrError> {
    let project = parent_dir.join(&options.name);
    if project.exists() {
        return Err(ProjectError::AlreadyExists { path: project }.into());
    }

    let version = resolve_for_new_project(ctx.install_root(), options.version.as_deref())?;
    let session = SdkSession::for_version(ctx, &version)?;
    tracing::info!("Creating {} with ESP-IDF {version}", options.name);

    session
        .idf(["create-project", options.name.as_str()], parent_dir)
        .run_checked()?;

    write_project_marker(&project, &version)?;
    session
        .idf(["set-target", options.target.as_str()], &project)
        .run_checked()?;
    apply_common_edits(&project, options)?;
    git(&project).arg("init").run_checked()?;

    if options.arduino {
        git(&project)
            .args(["submodule", "add", ARDUINO_ESP32_REPO, ARDUINO_COMPONENT_DIR])
            .run_checked()?;
        apply_arduino_edits(&project)?;
    }

    Ok(CreateResult {
        path: project,
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ROOT_CMAKE: &str = "cmake_minimum_required(VERSION 3.16)\n\
        include($ENV{IDF_PATH}/tools/cmake/project.cmake)\n\
        project(blink)\n";

    const MAIN_CMAKE: &str = "idf_component_register(SRCS \"blink.c\"\n                    INCLUDE_DIRS \".\")\n";

    fn skeleton(parent: &Path, name: &str) -> PathBuf {
        let project = parent.join(name);
        std::fs::create_dir_all(project.join("main")).unwrap();
        std::fs::write(project.join("CMakeLists.txt"), ROOT_CMAKE).unwrap();
        std::fs::write(
            project.join("main/CMakeLists.txt"),
            MAIN_CMAKE.replace("blink", name),
        )
        .unwrap();
        std::fs::write(project.join(format!("main/{name}.c")), "void app_main(void) {}\n").unwrap();
        project
    }

    fn options(name: &str, arduino: bool) -> CreateOptions {
        CreateOptions {
            name: name.to_string(),
            arduino,
            version: None,
            target: "esp32s3".to_string(),
        }
    }

    #[test]
    fn test_gitignore_lists_both_build_dirs_once() {
        let content = generate_gitignore_content();
        assert!(content.contains("build/\n"));
        assert!(content.contains("build-clang/\n"));
        assert_eq!(content.matches("sdkconfig\n").count(), 1);
    }

    #[test]
    fn test_clangd_adds_arduino_include() {
        assert!(!generate_clangd_content(false).contains("components/arduino"));
        assert!(generate_clangd_content(true).ends_with("  Add:\n    -I./components/arduino\n"));
    }

    #[test]
    fn test_sdkconfig_defaults_sets_target() {
        assert!(generate_sdkconfig_defaults("esp32c3").contains("CONFIG_IDF_TARGET=\"esp32c3\""));
    }

    #[test]
    fn test_component_dir_inserted_before_include_once() {
        let content = format!("{PROJECT_INCLUDE}\n{PROJECT_INCLUDE}\n");
        let edited = add_arduino_component_dir(&content);
        let lines: Vec<_> = edited.lines().collect();
        assert_eq!(lines[0], "set(EXTRA_COMPONENT_DIRS components/arduino)");
        assert_eq!(lines[1], PROJECT_INCLUDE);
        assert_eq!(lines[2], PROJECT_INCLUDE);
        assert_eq!(edited.matches("EXTRA_COMPONENT_DIRS").count(), 1);
    }

    #[test]
    fn test_require_arduino_without_existing_requires() {
        let edited = require_arduino(MAIN_CMAKE);
        assert!(edited.contains("INCLUDE_DIRS \".\"\n                    REQUIRES arduino)"));
    }

    #[test]
    fn test_require_arduino_extends_existing_requires() {
        let edited = require_arduino("idf_component_register(SRCS \"main.c\" REQUIRES driver)");
        assert!(edited.contains("REQUIRES arduino driver"));
    }

    #[test]
    fn test_common_edits_normalize_skeleton() {
        let temp = TempDir::new().unwrap();
        let project = skeleton(temp.path(), "blink");

        apply_common_edits(&project, &options("blink", false)).unwrap();

        let root_cmake = std::fs::read_to_string(project.join("CMakeLists.txt")).unwrap();
        assert!(root_cmake.contains("project(main)"));
        assert!(!root_cmake.contains("project(blink)"));
        assert!(project.join("main/main.c").exists());
        assert!(!project.join("main/blink.c").exists());
        let main_cmake = std::fs::read_to_string(project.join("main/CMakeLists.txt")).unwrap();
        assert!(main_cmake.contains("\"main.c\""));
        assert!(project.join(".gitignore").exists());
        assert!(project.join(".clangd").exists());
        let defaults = std::fs::read_to_string(project.join("sdkconfig.defaults")).unwrap();
        assert!(defaults.contains("esp32s3"));
    }

    #[test]
    fn test_missing_main_source_is_reported() {
        let temp = TempDir::new().unwrap();
        let project = skeleton(temp.path(), "blink");
        std::fs::remove_file(project.join("main/blink.c")).unwrap();

        let err = apply_common_edits(&project, &options("blink", false)).unwrap_err();
        assert!(matches!(
            err,
            IdfmgrError::Project(ProjectError::MainSourceMissing { .. })
        ));
    }

    #[test]
    fn test_arduino_edits_convert_main() {
        let temp = TempDir::new().unwrap();
        let project = skeleton(temp.path(), "blink");
        apply_common_edits(&project, &options("blink", true)).unwrap();

        apply_arduino_edits(&project).unwrap();

        let main_cpp = std::fs::read_to_string(project.join("main/main.cpp")).unwrap();
        assert!(main_cpp.contains("initArduino();"));
        assert!(!project.join("main/main.c").exists());
        let main_cmake = std::fs::read_to_string(project.join("main/CMakeLists.txt")).unwrap();
        assert!(main_cmake.contains("\"main.cpp\""));
        assert!(main_cmake.contains("REQUIRES arduino"));
        let root_cmake = std::fs::read_to_string(project.join("CMakeLists.txt")).unwrap();
        assert!(root_cmake.contains("set(EXTRA_COMPONENT_DIRS components/arduino)"));
    }

    #[test]
    fn test_existing_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("blink")).unwrap();
        let ctx = Context::with_install_root(temp.path().join("esp"));

        let err = create_project(&ctx, temp.path(), &options("blink", false)).unwrap_err();
        assert!(matches!(
            err,
            IdfmgrError::Project(ProjectError::AlreadyExists { .. })
        ));
    }
}
