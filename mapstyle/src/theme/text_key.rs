//! Interned tag keys for caption lookup
//!
//! Captions and path texts name the tag whose value they display. The key
//! is interned once per theme session into a [`TextKey`] carrying its
//! integer key-code, so that per-feature lookups compare integers.

use crate::model::{key_code, Tag};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// An interned tag key.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextKey {
    key: String,
    key_code: i32,
}

impl TextKey {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            key_code: key_code(key),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn key_code(&self) -> i32 {
        self.key_code
    }

    /// Value of the first tag whose key-code matches, if any.
    pub fn get_value<'a>(&self, tags: &'a [Tag]) -> Option<&'a str> {
        tags.iter()
            .find(|tag| tag.key_code == self.key_code)
            .map(|tag| tag.value.as_str())
    }
}

/// Interning table owned by one theme session.
#[derive(Debug, Default)]
pub struct TextKeyRegistry {
    keys: DashMap<String, Arc<TextKey>>,
    codes: DashMap<i32, String>,
}

impl TextKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared instance for `key`, creating it on first use.
    pub fn get_instance(&self, key: &str) -> Arc<TextKey> {
        if let Some(existing) = self.keys.get(key) {
            return Arc::clone(existing.value());
        }

        match self.keys.entry(key.to_string()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let text_key = Arc::new(TextKey::new(key));
                match self.codes.entry(text_key.key_code) {
                    Entry::Occupied(other) => {
                        tracing::warn!(
                            key,
                            other = %other.get(),
                            key_code = text_key.key_code,
                            "Text keys share a key-code; captions may show the wrong tag"
                        );
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(key.to_string());
                    }
                }
                tracing::trace!(key, key_code = text_key.key_code, "Interned text key");
                entry.insert(Arc::clone(&text_key));
                text_key
            }
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&self) {
        self.keys.clear();
        self.codes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_instance_returns_same_instance() {
        let registry = TextKeyRegistry::new();
        let a = registry.get_instance("name");
        let b = registry.get_instance("name");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_keys_are_distinct_instances() {
        let registry = TextKeyRegistry::new();
        let name = registry.get_instance("name");
        let reference = registry.get_instance("ref");
        assert!(!Arc::ptr_eq(&name, &reference));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_get_value_first_match() {
        let registry = TextKeyRegistry::new();
        let key = registry.get_instance("name");
        let tags = vec![
            Tag::new("highway", "primary"),
            Tag::new("name", "Main Street"),
            Tag::new("name", "Second"),
        ];
        assert_eq!(key.get_value(&tags), Some("Main Street"));
    }

    #[test]
    fn test_get_value_none_without_matching_code() {
        let registry = TextKeyRegistry::new();
        let key = registry.get_instance("name");
        assert_eq!(key.get_value(&[Tag::new("ref", "A1")]), None);
        assert_eq!(key.get_value(&[]), None);
    }

    #[test]
    fn test_concurrent_interning_yields_one_instance() {
        let registry = TextKeyRegistry::new();
        let instances: Vec<Arc<TextKey>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.get_instance("ele")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear() {
        let registry = TextKeyRegistry::new();
        registry.get_instance("name");
        registry.clear();
        assert!(registry.is_empty());
    }
}
