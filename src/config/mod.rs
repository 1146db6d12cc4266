//! Configuration management for `minify.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError
//! ├── settings   # Settings (runtime `strict` option)
//! └── mod.rs     # MinifyConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! strict = true
//! document_root = "public"
//! install_dir = "min"
//! groups_config = "min/groups.toml"
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{STRICT, STRICT_ALIAS, Settings};

use crate::validate::{DEFAULT_GROUPS_CONFIG, DEFAULT_INSTALL_DIR, FsValidator};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "minify.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing minify.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Validate base, groups and files while encoding
    pub strict: bool,

    /// Directory every checked path is resolved against
    pub document_root: PathBuf,

    /// Minify installation directory, relative to `document_root`
    pub install_dir: PathBuf,

    /// Group configuration file, relative to `document_root`
    pub groups_config: PathBuf,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            strict: true,
            document_root: PathBuf::from("."),
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            groups_config: PathBuf::from(DEFAULT_GROUPS_CONFIG),
        }
    }
}

impl MinifyConfig {
    /// Read and validate a config file.
    ///
    /// A relative `document_root` is resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config = Self::from_str(&content)?;
        if config.document_root.is_relative()
            && let Some(parent) = path.parent()
        {
            config.document_root = parent.join(&config.document_root);
        }
        Ok(config)
    }

    /// Parse and validate config content.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.install_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "`install_dir` must not be empty".to_string(),
            ));
        }
        if self.groups_config.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "`groups_config` must not be empty".to_string(),
            ));
        }
        if self.groups_config.is_absolute() {
            return Err(ConfigError::Validation(format!(
                "`groups_config` must be relative to the document root, got `{}`",
                self.groups_config.display()
            )));
        }
        Ok(())
    }

    /// Runtime settings seeded from this config.
    pub fn settings(&self) -> Settings {
        Settings::new(self.strict)
    }

    /// Filesystem validator rooted at `document_root`.
    pub fn validator(&self) -> FsValidator {
        FsValidator::new(&self.document_root)
            .with_install_dir(&self.install_dir)
            .with_groups_config(&self.groups_config)
    }
}
