//! Runtime options shared by every accumulator.
//!
//! There is exactly one option: `strict`. When on, encoding checks the
//! installation, base, groups and files through a [`Validator`] and fails on
//! the first problem. When off, descriptors are encoded verbatim.
//!
//! `debug` is accepted as another name for the same option.
//!
//! [`Validator`]: crate::validate::Validator

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::MinifyError;

/// Name of the strictness option.
pub const STRICT: &str = "strict";

/// Legacy name of the strictness option.
pub const STRICT_ALIAS: &str = "debug";

#[derive(Debug)]
pub struct Settings {
    strict: AtomicBool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Settings {
    pub const fn new(strict: bool) -> Self {
        Self {
            strict: AtomicBool::new(strict),
        }
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict.load(Ordering::SeqCst)
    }

    #[inline]
    pub fn set_strict(&self, strict: bool) {
        self.strict.store(strict, Ordering::SeqCst);
    }

    /// Read an option by name.
    pub fn get_option(&self, name: &str) -> Result<bool, MinifyError> {
        match name {
            STRICT | STRICT_ALIAS => Ok(self.is_strict()),
            _ => Err(MinifyError::InvalidOption(name.to_string())),
        }
    }

    /// Set an option by name.
    pub fn set_option(&self, name: &str, value: bool) -> Result<(), MinifyError> {
        match name {
            STRICT | STRICT_ALIAS => {
                self.set_strict(value);
                Ok(())
            }
            _ => Err(MinifyError::InvalidOption(name.to_string())),
        }
    }

    /// Restore defaults.
    pub fn reset(&self) {
        self.set_strict(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let settings = Settings::default();
        assert!(settings.is_strict());
        assert!(settings.get_option("strict").unwrap());
    }

    #[test]
    fn test_set_and_alias() {
        let settings = Settings::default();
        settings.set_option("strict", false).unwrap();
        assert!(!settings.get_option("debug").unwrap());

        settings.set_option("debug", true).unwrap();
        assert!(settings.get_option("strict").unwrap());
    }

    #[test]
    fn test_invalid_option() {
        let settings = Settings::default();
        let err = settings.get_option("verbose").unwrap_err();
        assert!(matches!(err, MinifyError::InvalidOption(ref n) if n == "verbose"));
        assert!(settings.set_option("Strict", false).is_err());
        assert!(settings.is_strict());
    }

    #[test]
    fn test_reset() {
        let settings = Settings::new(false);
        settings.reset();
        assert!(settings.is_strict());
    }
}
