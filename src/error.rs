//! Errors raised while accumulating and encoding Minify URIs.

use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// MinifyError
// ============================================================================

/// Every failure the library reports.
///
/// `InvalidKey` and `InvalidOption` are input-shape errors and are raised
/// regardless of strictness. The remaining variants come from the validator
/// and only surface in strict mode.
#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("Invalid Minifier ID: {0}")]
    InvalidKey(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("{0}")]
    Installation(String),

    #[error("{message}")]
    Base { path: PathBuf, message: String },

    #[error("{message}")]
    File { file: String, message: String },

    #[error("Cannot add group: does not exist: {0}")]
    Group(String),
}

impl MinifyError {
    pub(crate) fn installation(message: impl Into<String>) -> Self {
        Self::Installation(message.into())
    }

    pub(crate) fn base(path: &Path, message: impl Into<String>) -> Self {
        Self::Base {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn file(file: &str, message: impl Into<String>) -> Self {
        Self::File {
            file: file.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error came from a strict-mode check.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::InvalidKey(_) | Self::InvalidOption(_))
    }
}
