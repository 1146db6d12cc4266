//! The base/groups/files triple that a Minify URI is built from.
//!
//! Invariants:
//! - `groups` and `files` never contain empty strings or duplicates
//! - insertion order is preserved, also across removals
//! - `base` has no trailing `/` and is never empty (empty means unset)

use serde_json::{Map, Value, json};

/// Ordered list of unique, non-empty names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetList(Vec<String>);

impl AssetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless it is empty or already present.
    pub fn insert(&mut self, item: &str) -> bool {
        if item.is_empty() || self.contains(item) {
            return false;
        }
        self.0.push(item.to_string());
        true
    }

    /// Remove the first exact match, keeping the order of the rest.
    pub fn remove(&mut self, item: &str) -> bool {
        match self.0.iter().position(|x| x == item) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, item: &str) -> bool {
        self.0.iter().any(|x| x == item)
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Comma-joined form used inside a URI fragment.
    pub fn join(&self) -> String {
        self.0.join(",")
    }
}

impl<S: AsRef<str>> FromIterator<S> for AssetList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.insert(item.as_ref());
        }
        list
    }
}

/// Normalize a base directory: strip trailing `/`, treat empty as unset.
pub fn normalize_base(base: &str) -> Option<String> {
    let trimmed = base.trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// String elements of an array field, or nothing if the field is not an array.
fn json_strings<'a>(obj: &'a Map<String, Value>, key: &str) -> Vec<&'a str> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

// ============================================================================
// Descriptor
// ============================================================================

/// Assets referenced by one Minify URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub(crate) base: Option<String>,
    pub(crate) groups: AssetList,
    pub(crate) files: AssetList,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a descriptor from already-known parts, applying the usual normalization.
    pub fn from_parts<G, F>(base: Option<&str>, groups: G, files: F) -> Self
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        Self {
            base: base.and_then(normalize_base),
            groups: groups.into_iter().collect(),
            files: files.into_iter().collect(),
        }
    }

    /// Read a `{ "base", "groups", "files" }` value.
    ///
    /// Fields of the wrong shape are treated as absent, as are non-string
    /// list elements. Anything other than an object yields an empty descriptor.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self::from_parts(
            obj.get("base").and_then(Value::as_str),
            json_strings(obj, "groups"),
            json_strings(obj, "files"),
        )
    }

    /// Inverse of [`Descriptor::from_json`].
    pub fn to_json(&self) -> Value {
        json!({
            "base": self.base,
            "groups": self.groups.as_slice(),
            "files": self.files.as_slice(),
        })
    }

    #[inline]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    #[inline]
    pub fn groups(&self) -> &[String] {
        self.groups.as_slice()
    }

    #[inline]
    pub fn files(&self) -> &[String] {
        self.files.as_slice()
    }

    /// True when there is nothing to encode. A base alone does not count.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.files.is_empty()
    }

    /// Returns whether the effective base changed.
    pub(crate) fn set_base(&mut self, base: Option<&str>) -> bool {
        let base = base.and_then(normalize_base);
        if base == self.base {
            return false;
        }
        self.base = base;
        true
    }
}
