//! Filesystem-backed validator.
//!
//! Resolves every path against a document root:
//!
//! ```text
//! <root>/<install_dir>           ← Minify installation (checked first)
//! <root>/<groups_config>         ← group name → file list (TOML table)
//! <root>/<base>/<file>           ← referenced asset
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rustc_hash::FxHashSet;

use super::Validator;
use crate::debug;
use crate::error::MinifyError;

/// Default Minify installation directory, relative to the document root.
pub const DEFAULT_INSTALL_DIR: &str = "min";

/// Default groups config file, relative to the document root.
pub const DEFAULT_GROUPS_CONFIG: &str = "min/groups.toml";

#[derive(Debug)]
pub struct FsValidator {
    root: PathBuf,
    install_dir: PathBuf,
    groups_config: PathBuf,
    /// Group names, loaded on first group check.
    groups: OnceLock<FxHashSet<String>>,
}

impl FsValidator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            groups_config: PathBuf::from(DEFAULT_GROUPS_CONFIG),
            groups: OnceLock::new(),
        }
    }

    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = dir.into();
        self
    }

    pub fn with_groups_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.groups_config = path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a slash-separated relative path onto the document root.
    ///
    /// Leading slashes are ignored so `/css` and `css` resolve the same way.
    fn resolve(&self, rel: &str) -> PathBuf {
        self.root.join(rel.trim_start_matches('/'))
    }

    fn groups(&self) -> &FxHashSet<String> {
        self.groups
            .get_or_init(|| load_group_names(&self.root.join(&self.groups_config)))
    }
}

/// Read group names from a TOML table such as `css = ["a.css", "b.css"]`.
///
/// A missing or malformed file yields no groups.
fn load_group_names(path: &Path) -> FxHashSet<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("validate"; "cannot read groups config {}: {}", path.display(), e);
            return FxHashSet::default();
        }
    };
    match content.parse::<toml::Table>() {
        Ok(table) => table.into_iter().map(|(name, _)| name).collect(),
        Err(e) => {
            debug!("validate"; "cannot parse groups config {}: {}", path.display(), e);
            FxHashSet::default()
        }
    }
}

fn is_readable_dir(path: &Path) -> bool {
    fs::read_dir(path).is_ok()
}

fn is_readable_file(path: &Path) -> bool {
    fs::File::open(path).is_ok()
}

impl Validator for FsValidator {
    fn check_installed(&self) -> Result<(), MinifyError> {
        let path = self.root.join(&self.install_dir);
        if !path.is_dir() {
            return Err(MinifyError::installation(
                "Minify has not been installed in this project",
            ));
        }
        if !is_readable_dir(&path) {
            return Err(MinifyError::installation(
                "The Minify directory is not readable",
            ));
        }
        Ok(())
    }

    fn check_base(&self, base: &str) -> Result<(), MinifyError> {
        let path = self.resolve(base);
        if !path.exists() {
            let msg = format!("The Minify base does not exist: {}", path.display());
            return Err(MinifyError::base(&path, msg));
        }
        if !path.is_dir() {
            let msg = format!("The Minify base is not a directory: {}", path.display());
            return Err(MinifyError::base(&path, msg));
        }
        if !is_readable_dir(&path) {
            return Err(MinifyError::base(&path, "The Minify base is not readable"));
        }
        Ok(())
    }

    fn check_file(&self, file: &str, base: Option<&str>) -> Result<(), MinifyError> {
        let path = match base {
            Some(base) => self.resolve(base).join(file.trim_start_matches('/')),
            None => self.resolve(file),
        };
        if !path.exists() {
            let msg = format!("File not exist: {}", path.display());
            return Err(MinifyError::file(file, msg));
        }
        if !is_readable_file(&path) {
            let msg = format!("File is not readable: {}", path.display());
            return Err(MinifyError::file(file, msg));
        }
        Ok(())
    }

    fn check_group(&self, group: &str) -> Result<(), MinifyError> {
        if self.groups().contains(group) {
            Ok(())
        } else {
            Err(MinifyError::Group(group.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_root() -> (TempDir, FsValidator) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("min")).unwrap();
        fs::write(
            root.join("min/groups.toml"),
            "css = [\"styles/style1.css\"]\njs = [\"scripts/script1.js\"]\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("styles/page")).unwrap();
        fs::write(root.join("styles/style1.css"), "body {}").unwrap();
        fs::write(root.join("styles/page/pagestyle.css"), "p {}").unwrap();
        let validator = FsValidator::new(root);
        (dir, validator)
    }

    #[test]
    fn test_installed() {
        let (dir, validator) = make_root();
        assert!(validator.check_installed().is_ok());

        fs::remove_dir_all(dir.path().join("min")).unwrap();
        let err = validator.check_installed().unwrap_err();
        assert!(matches!(err, MinifyError::Installation(_)));
        assert_eq!(err.to_string(), "Minify has not been installed in this project");
    }

    #[test]
    fn test_custom_install_dir() {
        let (dir, validator) = make_root();
        let validator = validator.with_install_dir("vendor/min");
        assert!(validator.check_installed().is_err());

        fs::create_dir_all(dir.path().join("vendor/min")).unwrap();
        assert!(validator.check_installed().is_ok());
    }

    #[test]
    fn test_base() {
        let (_dir, validator) = make_root();
        assert!(validator.check_base("styles").is_ok());
        assert!(validator.check_base("/styles").is_ok());

        let err = validator.check_base("nope").unwrap_err();
        assert!(err.to_string().starts_with("The Minify base does not exist"));

        let err = validator.check_base("styles/style1.css").unwrap_err();
        assert!(matches!(err, MinifyError::Base { .. }));
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_file_with_and_without_base() {
        let (_dir, validator) = make_root();
        assert!(validator.check_file("styles/style1.css", None).is_ok());
        assert!(validator.check_file("style1.css", Some("styles")).is_ok());
        assert!(validator.check_file("page/pagestyle.css", Some("styles")).is_ok());

        let err = validator.check_file("style1.css", None).unwrap_err();
        assert!(matches!(err, MinifyError::File { ref file, .. } if file == "style1.css"));
        assert!(err.to_string().starts_with("File not exist"));
    }

    #[test]
    fn test_groups() {
        let (_dir, validator) = make_root();
        assert!(validator.check_group("css").is_ok());
        assert!(validator.check_group("js").is_ok());
        let err = validator.check_group("fonts").unwrap_err();
        assert!(matches!(err, MinifyError::Group(ref g) if g == "fonts"));
    }

    #[test]
    fn test_groups_loaded_once() {
        let (dir, validator) = make_root();
        assert!(validator.check_group("css").is_ok());

        // Later edits are not observed by an existing validator
        fs::write(dir.path().join("min/groups.toml"), "fonts = []\n").unwrap();
        assert!(validator.check_group("css").is_ok());
        assert!(validator.check_group("fonts").is_err());
    }

    #[test]
    fn test_missing_groups_config() {
        let (_dir, validator) = make_root();
        let validator = validator.with_groups_config("min/missing.toml");
        assert!(validator.check_group("css").is_err());
    }

    #[test]
    fn test_malformed_groups_config() {
        let (dir, validator) = make_root();
        fs::write(dir.path().join("min/groups.toml"), "css = [").unwrap();
        assert!(validator.check_group("css").is_err());
    }
}
