//! Bundled form-definition discovery.

use crate::constants::FORM_FILE_EXTENSION;
use crate::{ModuleError, ModuleResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Recursively collect the form-definition files under `dir`.
///
/// Only files with the `.html` extension are returned. The result is
/// sorted so imports happen in a deterministic order regardless of
/// filesystem iteration order.
///
/// # Errors
///
/// Returns [`ModuleError::FormsDirRead`] when `dir` or any subdirectory
/// cannot be read.
pub fn scan_form_files(dir: &Path) -> ModuleResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) -> ModuleResult<()> {
    let entries = fs::read_dir(dir).map_err(|source| ModuleError::FormsDirRead {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ModuleError::FormsDirRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect(&path, files)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(FORM_FILE_EXTENSION) {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scan_returns_sorted_html_files_recursively() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("b.html"), "<htmlform/>").unwrap();
        fs::write(temp.path().join("a.html"), "<htmlform/>").unwrap();
        fs::write(temp.path().join("nested/c.html"), "<htmlform/>").unwrap();

        let files = scan_form_files(temp.path()).unwrap();
        assert_eq!(
            files,
            vec![
                temp.path().join("a.html"),
                temp.path().join("b.html"),
                temp.path().join("nested/c.html"),
            ]
        );
    }

    #[test]
    fn scan_ignores_other_file_types() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("form.html"), "<htmlform/>").unwrap();
        fs::write(temp.path().join("readme.txt"), "notes").unwrap();
        fs::write(temp.path().join("no_extension"), "").unwrap();

        let files = scan_form_files(temp.path()).unwrap();
        assert_eq!(files, vec![temp.path().join("form.html")]);
    }

    #[test]
    fn scan_of_a_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let result = scan_form_files(&temp.path().join("absent"));
        assert!(matches!(result, Err(ModuleError::FormsDirRead { .. })));
    }

    #[test]
    fn scan_of_an_empty_directory_returns_nothing() {
        let temp = TempDir::new().unwrap();
        assert!(scan_form_files(temp.path()).unwrap().is_empty());
    }
}
