//! Mutable holder of one [`Descriptor`] with a memoized encoding.
//!
//! The memo is a two-state machine:
//!
//! ```text
//! Dirty ──create_uri──▶ Clean(encoded)
//!   ▲                        │
//!   └──── any mutation ──────┘
//! ```
//!
//! Failed encodes leave the state `Dirty`.

use super::encoder::{self, Encoded};
use super::Descriptor;
use crate::config::Settings;
use crate::debug;
use crate::error::MinifyError;
use crate::validate::Validator;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum UriCache {
    #[default]
    Dirty,
    Clean(Encoded),
}

#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    descriptor: Descriptor,
    cache: UriCache,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn invalidate(&mut self) {
        self.cache = UriCache::Dirty;
    }

    /// Clear the memo when `changed` and pass it through.
    #[inline]
    fn touched(&mut self, changed: bool) -> bool {
        if changed {
            self.invalidate();
        }
        changed
    }

    // ------------------------------------------------------------------------
    // files
    // ------------------------------------------------------------------------

    /// Append a file unless it is empty or already present.
    pub fn add_file(&mut self, file: &str) -> bool {
        let added = self.descriptor.files.insert(file);
        self.touched(added)
    }

    /// Add each file in order, returning the ones actually inserted.
    pub fn add_files<I>(&mut self, files: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        files
            .into_iter()
            .filter_map(|f| {
                let f = f.as_ref();
                self.add_file(f).then(|| f.to_string())
            })
            .collect()
    }

    pub fn remove_file(&mut self, file: &str) -> bool {
        let removed = self.descriptor.files.remove(file);
        self.touched(removed)
    }

    /// Remove each file, returning the removed ones in the order requested.
    pub fn remove_files<I>(&mut self, files: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        files
            .into_iter()
            .filter_map(|f| {
                let f = f.as_ref();
                self.remove_file(f).then(|| f.to_string())
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // groups
    // ------------------------------------------------------------------------

    pub fn add_group(&mut self, group: &str) -> bool {
        let added = self.descriptor.groups.insert(group);
        self.touched(added)
    }

    pub fn add_groups<I>(&mut self, groups: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        groups
            .into_iter()
            .filter_map(|g| {
                let g = g.as_ref();
                self.add_group(g).then(|| g.to_string())
            })
            .collect()
    }

    pub fn remove_group(&mut self, group: &str) -> bool {
        let removed = self.descriptor.groups.remove(group);
        self.touched(removed)
    }

    pub fn remove_groups<I>(&mut self, groups: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        groups
            .into_iter()
            .filter_map(|g| {
                let g = g.as_ref();
                self.remove_group(g).then(|| g.to_string())
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // base
    // ------------------------------------------------------------------------

    /// Set or unset the base directory.
    ///
    /// A trailing `/` is dropped and an empty string unsets the base.
    /// Returns whether the effective base changed.
    pub fn set_base(&mut self, base: Option<&str>) -> bool {
        let changed = self.descriptor.set_base(base);
        self.touched(changed)
    }

    // ------------------------------------------------------------------------
    // accessors
    // ------------------------------------------------------------------------

    #[inline]
    pub fn base(&self) -> Option<&str> {
        self.descriptor.base()
    }

    #[inline]
    pub fn files(&self) -> &[String] {
        self.descriptor.files()
    }

    #[inline]
    pub fn groups(&self) -> &[String] {
        self.descriptor.groups()
    }

    #[inline]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Whether the next `create_uri` will be answered from the memo.
    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self.cache, UriCache::Clean(_))
    }

    // ------------------------------------------------------------------------
    // encoding
    // ------------------------------------------------------------------------

    /// Encode the current state, reusing the memo if nothing changed since.
    ///
    /// Strictness is read from `settings` on every call that misses the memo.
    pub fn create_uri(
        &mut self,
        settings: &Settings,
        validator: &dyn Validator,
    ) -> Result<Encoded, MinifyError> {
        if let UriCache::Clean(encoded) = &self.cache {
            debug!("encode"; "cache hit");
            return Ok(encoded.clone());
        }
        let encoded = encoder::encode(&self.descriptor, settings.is_strict(), validator)?;
        self.cache = UriCache::Clean(encoded.clone());
        Ok(encoded)
    }
}

impl From<&Accumulator> for Descriptor {
    fn from(acc: &Accumulator) -> Self {
        acc.descriptor.clone()
    }
}

impl From<Descriptor> for Accumulator {
    fn from(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            cache: UriCache::Dirty,
        }
    }
}
