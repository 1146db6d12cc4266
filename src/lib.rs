//! Build canonical Minify URIs from accumulated asset references.
//!
//! An [`Accumulator`] collects files, groups and an optional base directory.
//! Encoding turns that state into a single URI for the Minify service:
//!
//! ```text
//! /min/b=scripts&amp;g=libs&amp;f=app.js,page.js
//! ```
//!
//! In strict mode (the default) every reference is checked by a
//! [`Validator`] first. [`Minify`] bundles the strict option, a keyed
//! [`Registry`] of accumulators and the validator into one value.
//!
//! # Example
//!
//! ```
//! use minify_uri::{Minify, Settings, validate::Permissive};
//!
//! let minify = Minify::with_validator(Settings::new(false), Permissive);
//! minify.registry().set_base("head", Some("scripts"));
//! minify.registry().add_file("head", "script1.js");
//!
//! let uri = minify.create_uri("head").unwrap();
//! assert_eq!(uri.as_uri(), Some("/min/b=scripts&amp;f=script1.js"));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logger;
pub mod validate;

pub use crate::config::{ConfigError, MinifyConfig, Settings};
pub use crate::core::{
    Accumulator, AccumulatorHandle, Descriptor, Encoded, Minify, Registry, key_from_value,
};
pub use crate::error::MinifyError;
pub use crate::validate::Validator;

/// Encode a descriptor directly, without an accumulator or registry.
pub fn minify(
    descriptor: &Descriptor,
    settings: &Settings,
    validator: &dyn Validator,
) -> Result<Encoded, MinifyError> {
    crate::core::encode(descriptor, settings.is_strict(), validator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Permissive;

    #[test]
    fn test_minify_helper() {
        let desc = Descriptor::from_parts(Some("styles"), ["css"], ["style1.css"]);
        let encoded = minify(&desc, &Settings::new(false), &Permissive).unwrap();
        assert_eq!(encoded.as_uri(), Some("/min/b=styles&amp;g=css&amp;f=style1.css"));
    }

    #[test]
    fn test_minify_helper_no_content() {
        let encoded = minify(&Descriptor::new(), &Settings::default(), &Permissive).unwrap();
        assert!(encoded.is_no_content());
    }
}
