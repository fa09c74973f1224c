//! Module configuration.
//!
//! Configuration is resolved once, when the host activates the module, and
//! passed into the activator. Operations never read environment variables
//! or probe the filesystem for configuration themselves.

use crate::constants::HTMLFORMS_DIR;
use crate::{ModuleError, ModuleResult};
use std::path::{Path, PathBuf};

/// Configuration resolved at module activation.
#[derive(Clone, Debug)]
pub struct ModuleConfig {
    htmlforms_dir: PathBuf,
}

impl ModuleConfig {
    /// Create a new `ModuleConfig`.
    ///
    /// The forms directory is only read when the html-form collaborator is
    /// installed, so it is not required to exist yet.
    pub fn new(htmlforms_dir: PathBuf) -> ModuleResult<Self> {
        if htmlforms_dir.as_os_str().is_empty() {
            return Err(ModuleError::InvalidConfig(
                "htmlforms_dir cannot be empty".into(),
            ));
        }

        Ok(Self { htmlforms_dir })
    }

    pub fn htmlforms_dir(&self) -> &Path {
        &self.htmlforms_dir
    }
}

/// Resolve the bundled form-definition directory.
///
/// If `override_dir` is provided, it must be an existing directory.
/// Otherwise this searches for `resources/htmlforms/` relative to the
/// current working directory and then walks up from `CARGO_MANIFEST_DIR`.
pub fn resolve_htmlforms_dir(override_dir: Option<PathBuf>) -> ModuleResult<PathBuf> {
    if let Some(dir) = override_dir {
        if dir.is_dir() {
            return Ok(dir);
        }
        return Err(ModuleError::InvalidConfig(format!(
            "htmlforms override {} is not a directory",
            dir.display()
        )));
    }

    let cwd_relative = PathBuf::from(HTMLFORMS_DIR);
    if cwd_relative.is_dir() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(HTMLFORMS_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }

    Err(ModuleError::InvalidConfig(
        "could not locate resources/htmlforms/ directory".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_rejects_an_empty_path() {
        let result = ModuleConfig::new(PathBuf::new());
        assert!(matches!(result, Err(ModuleError::InvalidConfig(_))));
    }

    #[test]
    fn config_accepts_a_not_yet_existing_directory() {
        let config = ModuleConfig::new(PathBuf::from("resources/not-there")).unwrap();
        assert_eq!(
            config.htmlforms_dir(),
            Path::new("resources/not-there")
        );
    }

    #[test]
    fn override_must_be_an_existing_directory() {
        let temp = TempDir::new().unwrap();

        let resolved = resolve_htmlforms_dir(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(resolved, temp.path());

        let missing = temp.path().join("nope");
        let result = resolve_htmlforms_dir(Some(missing));
        assert!(matches!(result, Err(ModuleError::InvalidConfig(_))));
    }

    #[test]
    fn default_resolution_finds_the_bundled_directory() {
        // The crate ships resources/htmlforms/, reachable from the
        // manifest directory.
        let resolved = resolve_htmlforms_dir(None).unwrap();
        assert!(resolved.ends_with(HTMLFORMS_DIR));
        assert!(resolved.is_dir());
    }
}
