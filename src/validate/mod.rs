//! Strict-mode checks against the environment Minify runs in.
//!
//! | Adapter       | Purpose                                           |
//! |---------------|---------------------------------------------------|
//! | `FsValidator` | Document root on disk + groups config file        |
//! | `Permissive`  | Accepts everything                                |
//!
//! The encoder only consults a validator when strict mode is on.

mod fs;

pub use fs::{DEFAULT_GROUPS_CONFIG, DEFAULT_INSTALL_DIR, FsValidator};

use crate::error::MinifyError;

/// Checks consulted by the encoder before emitting each fragment.
pub trait Validator: Send + Sync {
    /// The Minify service directory exists and is readable.
    fn check_installed(&self) -> Result<(), MinifyError>;

    /// `base` is an existing, readable directory.
    fn check_base(&self, base: &str) -> Result<(), MinifyError>;

    /// `file` exists under `base` (or under the root if no base) and is readable.
    fn check_file(&self, file: &str, base: Option<&str>) -> Result<(), MinifyError>;

    /// `group` is a key of the group configuration.
    fn check_group(&self, group: &str) -> Result<(), MinifyError>;
}

/// Validator that never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Permissive;

impl Validator for Permissive {
    fn check_installed(&self) -> Result<(), MinifyError> {
        Ok(())
    }

    fn check_base(&self, _base: &str) -> Result<(), MinifyError> {
        Ok(())
    }

    fn check_file(&self, _file: &str, _base: Option<&str>) -> Result<(), MinifyError> {
        Ok(())
    }

    fn check_group(&self, _group: &str) -> Result<(), MinifyError> {
        Ok(())
    }
}
