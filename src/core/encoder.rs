//! Descriptor → Minify URI.
//!
//! ```text
//! /min/b=<base>&amp;g=<g1>,<g2>&amp;f=<f1>,<f2>
//! ```
//!
//! Fragments always appear in `b`, `g`, `f` order and absent ones are skipped.
//! Fragments are joined with the literal `&amp;`, which is the wire format
//! the Minify service expects from HTML-embedded URIs.
//!
//! In strict mode every part is checked before it is emitted, in the same
//! order, so the first invalid entry is the one reported.

use std::fmt;

use super::Descriptor;
use crate::debug;
use crate::error::MinifyError;
use crate::validate::Validator;

/// Path every URI starts with.
pub const URI_PREFIX: &str = "/min/";

/// Separator between fragments.
pub const FRAGMENT_SEPARATOR: &str = "&amp;";

/// Result of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Uri(String),
    /// Neither groups nor files were present.
    NoContent,
}

impl Encoded {
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(uri.as_str()),
            Self::NoContent => None,
        }
    }

    pub fn into_uri(self) -> Option<String> {
        match self {
            Self::Uri(uri) => Some(uri),
            Self::NoContent => None,
        }
    }

    #[inline]
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

impl fmt::Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => f.write_str(uri),
            Self::NoContent => Ok(()),
        }
    }
}

/// Encode `descriptor`, consulting `validator` only when `strict` is set.
///
/// Validation failures abort the whole encode; no partial URI is produced.
pub fn encode(
    descriptor: &Descriptor,
    strict: bool,
    validator: &dyn Validator,
) -> Result<Encoded, MinifyError> {
    if strict {
        validator.check_installed()?;
    }

    let base = descriptor.base();
    let mut fragments: Vec<String> = Vec::with_capacity(3);

    if let Some(base) = base {
        if strict {
            validator.check_base(base)?;
        }
        fragments.push(format!("b={base}"));
    }

    let groups = descriptor.groups();
    if !groups.is_empty() {
        if strict {
            for group in groups {
                validator.check_group(group)?;
            }
        }
        fragments.push(format!("g={}", descriptor.groups.join()));
    }

    let files = descriptor.files();
    if !files.is_empty() {
        if strict {
            for file in files {
                validator.check_file(file, base)?;
            }
        }
        fragments.push(format!("f={}", descriptor.files.join()));
    }

    if descriptor.is_empty() {
        debug!("encode"; "nothing to encode (base: {:?})", base);
        return Ok(Encoded::NoContent);
    }

    let uri = format!("{URI_PREFIX}{}", fragments.join(FRAGMENT_SEPARATOR));
    debug!("encode"; "{} (strict: {})", uri, strict);
    Ok(Encoded::Uri(uri))
}
