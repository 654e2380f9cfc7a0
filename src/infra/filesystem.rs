//! Filesystem operations
//!
//! Thin wrappers over `std::fs` that attach the offending path to every
//! error.

use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Write content to a file, creating parent directories
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Rename a file or directory
pub fn rename(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    std::fs::rename(from, to).map_err(|e| FilesystemError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })
}

/// Rewrite a text file in place
pub fn edit_file<F>(path: &Path, edit: F) -> Result<(), FilesystemError>
where
    F: FnOnce(&str) -> String,
{
    let content = read_file(path)?;
    write_file(path, &edit(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main/CMakeLists.txt");
        write_file(&path, "idf_component_register()").unwrap();
        assert_eq!(read_file(&path).unwrap(), "idf_component_register()");
    }

    #[test]
    fn test_edit_file_applies_closure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CMakeLists.txt");
        write_file(&path, "project(blink)\n").unwrap();

        edit_file(&path, |c| c.replace("project(blink)", "project(main)")).unwrap();

        assert_eq!(read_file(&path).unwrap(), "project(main)\n");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");
        let err = read_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_rename_moves_file() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("blink.c");
        let to = temp.path().join("main.c");
        write_file(&from, "void app_main(void) {}").unwrap();

        rename(&from, &to).unwrap();

        assert!(!from.exists());
        assert!(to.exists());
    }

    #[test]
    fn test_remove_missing_dir_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(remove_dir_all(&temp.path().join("gone")).is_err());
    }
}
