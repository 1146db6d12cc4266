//! Keyed collection of independent accumulators.
//!
//! Accumulators are created lazily on first reference to a key and live
//! until unregistered. Each one sits behind its own mutex so that a
//! mutation and an encode-and-memoize never interleave.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;

use super::Accumulator;
use super::encoder::Encoded;
use crate::config::Settings;
use crate::debug;
use crate::error::MinifyError;
use crate::validate::Validator;

/// Shared handle to a registered accumulator.
pub type AccumulatorHandle = Arc<Mutex<Accumulator>>;

/// Accept a key from untyped input. Only JSON strings are valid keys.
pub fn key_from_value(value: &Value) -> Result<&str, MinifyError> {
    value
        .as_str()
        .ok_or_else(|| MinifyError::InvalidKey(value.to_string()))
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: DashMap<String, AccumulatorHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulator for `key`, created empty if unseen.
    pub fn get(&self, key: &str) -> AccumulatorHandle {
        if let Some(handle) = self.entries.get(key) {
            return Arc::clone(handle.value());
        }
        let entry = self.entries.entry(key.to_string()).or_insert_with(|| {
            debug!("registry"; "new accumulator '{}'", key);
            AccumulatorHandle::default()
        });
        Arc::clone(entry.value())
    }

    /// Run `f` against the accumulator for `key` while holding its lock.
    ///
    /// The map shard is released before the accumulator is locked.
    pub fn with<R>(&self, key: &str, f: impl FnOnce(&mut Accumulator) -> R) -> R {
        let handle = self.get(key);
        let mut acc = handle.lock();
        f(&mut acc)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort_unstable();
        keys
    }

    /// Drop the accumulator for `key`. Returns whether it existed.
    pub fn unregister(&self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            debug!("registry"; "unregistered '{}'", key);
        }
        existed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ------------------------------------------------------------------------
    // delegations
    // ------------------------------------------------------------------------

    pub fn add_file(&self, key: &str, file: &str) -> bool {
        self.with(key, |acc| acc.add_file(file))
    }

    pub fn add_files<I>(&self, key: &str, files: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.with(key, |acc| acc.add_files(files))
    }

    pub fn add_group(&self, key: &str, group: &str) -> bool {
        self.with(key, |acc| acc.add_group(group))
    }

    pub fn add_groups<I>(&self, key: &str, groups: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.with(key, |acc| acc.add_groups(groups))
    }

    pub fn remove_file(&self, key: &str, file: &str) -> bool {
        self.with(key, |acc| acc.remove_file(file))
    }

    pub fn remove_files<I>(&self, key: &str, files: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.with(key, |acc| acc.remove_files(files))
    }

    pub fn remove_group(&self, key: &str, group: &str) -> bool {
        self.with(key, |acc| acc.remove_group(group))
    }

    pub fn remove_groups<I>(&self, key: &str, groups: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.with(key, |acc| acc.remove_groups(groups))
    }

    pub fn set_base(&self, key: &str, base: Option<&str>) -> bool {
        self.with(key, |acc| acc.set_base(base))
    }

    pub fn base(&self, key: &str) -> Option<String> {
        self.with(key, |acc| acc.base().map(str::to_string))
    }

    pub fn files(&self, key: &str) -> Vec<String> {
        self.with(key, |acc| acc.files().to_vec())
    }

    pub fn groups(&self, key: &str) -> Vec<String> {
        self.with(key, |acc| acc.groups().to_vec())
    }

    pub fn create_uri(
        &self,
        key: &str,
        settings: &Settings,
        validator: &dyn Validator,
    ) -> Result<Encoded, MinifyError> {
        self.with(key, |acc| acc.create_uri(settings, validator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Permissive;
    use serde_json::json;

    #[test]
    fn test_get_is_lazy_and_shared() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        let first = registry.get("x");
        let second = registry.get("x");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);

        first.lock().add_file("a.js");
        assert_eq!(second.lock().files(), ["a.js"]);
    }

    #[test]
    fn test_keys_are_independent() {
        let registry = Registry::new();
        registry.add_file("head", "a.css");
        registry.add_file("foot", "b.js");
        assert_eq!(registry.files("head"), ["a.css"]);
        assert_eq!(registry.files("foot"), ["b.js"]);
        assert_eq!(registry.keys(), ["foot", "head"]);
    }

    #[test]
    fn test_delegations() {
        let registry = Registry::new();
        let settings = Settings::new(false);

        assert_eq!(registry.add_files("k", ["a", "b", "a"]), ["a", "b"]);
        assert_eq!(registry.add_groups("k", ["css"]), ["css"]);
        assert!(registry.set_base("k", Some("assets/")));
        assert_eq!(registry.base("k").as_deref(), Some("assets"));

        let uri = registry.create_uri("k", &settings, &Permissive).unwrap();
        assert_eq!(uri.as_uri(), Some("/min/b=assets&amp;g=css&amp;f=a,b"));

        assert_eq!(registry.remove_files("k", ["b", "c"]), ["b"]);
        assert!(registry.remove_group("k", "css"));
        assert!(!registry.remove_file("k", "b"));
        assert!(registry.groups("k").is_empty());

        let uri = registry.create_uri("k", &settings, &Permissive).unwrap();
        assert_eq!(uri.as_uri(), Some("/min/b=assets&amp;f=a"));
    }

    #[test]
    fn test_unregister() {
        let registry = Registry::new();
        registry.add_file("x", "a.js");
        assert!(registry.unregister("x"));
        assert!(!registry.unregister("x"));
        assert!(!registry.contains("x"));

        // A fresh accumulator replaces the old one
        assert!(registry.files("x").is_empty());
        assert!(registry.contains("x"));
    }

    #[test]
    fn test_clear() {
        let registry = Registry::new();
        registry.get("a");
        registry.get("b");
        registry.clear();
        assert!(registry.keys().is_empty());
    }

    #[test]
    fn test_key_from_value() {
        assert_eq!(key_from_value(&json!("head")).unwrap(), "head");
        let err = key_from_value(&json!(42)).unwrap_err();
        assert!(matches!(err, MinifyError::InvalidKey(ref k) if k == "42"));
        assert!(key_from_value(&Value::Null).is_err());
    }

    #[test]
    fn test_concurrent_get() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.add_file("shared", &format!("file{}.js", i % 4));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.files("shared").len(), 4);
    }
}
