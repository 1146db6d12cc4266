//! Explicitly constructed state container.
//!
//! Holds what would otherwise be process globals: the `strict` option, the
//! registry of keyed accumulators, and the validator used in strict mode.

use std::sync::Arc;

use super::{AccumulatorHandle, Descriptor, Encoded, Registry, encode};
use crate::config::{MinifyConfig, Settings};
use crate::error::MinifyError;
use crate::validate::Validator;

pub struct Minify {
    settings: Settings,
    registry: Registry,
    validator: Arc<dyn Validator>,
}

impl Default for Minify {
    fn default() -> Self {
        Self::from_config(&MinifyConfig::default())
    }
}

impl Minify {
    /// Strictness from `config`, filesystem validator rooted at its document root.
    pub fn from_config(config: &MinifyConfig) -> Self {
        Self::with_validator(config.settings(), config.validator())
    }

    pub fn with_validator(settings: Settings, validator: impl Validator + 'static) -> Self {
        Self {
            settings,
            registry: Registry::new(),
            validator: Arc::new(validator),
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn validator(&self) -> &dyn Validator {
        self.validator.as_ref()
    }

    pub fn get_option(&self, name: &str) -> Result<bool, MinifyError> {
        self.settings.get_option(name)
    }

    pub fn set_option(&self, name: &str, value: bool) -> Result<(), MinifyError> {
        self.settings.set_option(name, value)
    }

    /// Accumulator registered under `key`.
    pub fn get(&self, key: &str) -> AccumulatorHandle {
        self.registry.get(key)
    }

    /// Encode (or reuse the memo of) the accumulator registered under `key`.
    pub fn create_uri(&self, key: &str) -> Result<Encoded, MinifyError> {
        self.registry
            .create_uri(key, &self.settings, self.validator.as_ref())
    }

    /// Encode a standalone descriptor without registering anything.
    pub fn encode(&self, descriptor: &Descriptor) -> Result<Encoded, MinifyError> {
        encode(descriptor, self.settings.is_strict(), self.validator.as_ref())
    }

    /// Forget every accumulator and restore default options.
    pub fn reset(&self) {
        self.registry.clear();
        self.settings.reset();
    }
}
