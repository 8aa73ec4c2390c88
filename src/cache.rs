//! Process-lifetime cache of loaded namespaces.
//!
//! The cache is an explicit handle rather than a process global: every clone
//! shares the same underlying map, so callers decide which loaders share
//! state by handing them the same handle. There is no eviction and no TTL.
//! Entries live until [`TranslationCache::clear`], which in practice means
//! until the process restarts or an operator clears it after publishing new
//! copy.

use crate::loader::LoadedNamespace;
use crate::namespace::Namespace;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shared, clonable cache of namespace load results.
#[derive(Debug, Clone, Default)]
pub struct TranslationCache {
    entries: Arc<Mutex<HashMap<Namespace, LoadedNamespace>>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for a namespace, if any.
    pub fn get(&self, namespace: Namespace) -> Option<LoadedNamespace> {
        self.lock().get(&namespace).cloned()
    }

    /// Store a load result, replacing any previous entry for its namespace.
    ///
    /// Concurrent loaders may race to insert the same namespace; last write
    /// wins, which is harmless because results for a namespace are
    /// equivalent within one process configuration.
    pub fn insert(&self, entry: LoadedNamespace) {
        self.lock().insert(entry.namespace, entry);
    }

    pub fn contains(&self, namespace: Namespace) -> bool {
        self.lock().contains_key(&namespace)
    }

    /// Drop every entry. The next load of each namespace hits its source.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Namespace, LoadedNamespace>> {
        self.entries
            .lock()
            .expect("translation cache mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Provenance;
    use crate::resource::{TranslationResource, TranslationValue};

    fn entry(namespace: Namespace, key: &str, text: &str) -> LoadedNamespace {
        let mut resource = TranslationResource::new();
        resource.insert(key, TranslationValue::Text(text.to_string()));
        LoadedNamespace {
            namespace,
            resource,
            provenance: Provenance::Local,
        }
    }

    // ==================== Cache Tests ====================

    #[test]
    fn test_new_cache_is_empty() {
        let cache = TranslationCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.get(Namespace::Common).is_none());
    }

    #[test]
    fn test_insert_then_get_returns_entry() {
        let cache = TranslationCache::new();
        cache.insert(entry(Namespace::Common, "loading", "Wird geladen..."));

        assert!(cache.contains(Namespace::Common));
        let cached = cache.get(Namespace::Common).unwrap();
        assert_eq!(cached.namespace, Namespace::Common);
        assert_eq!(cached.resource.lookup("loading"), Some("Wird geladen..."));
        assert_eq!(cached.provenance, Provenance::Local);
    }

    #[test]
    fn test_insert_replaces_previous_entry() {
        let cache = TranslationCache::new();
        cache.insert(entry(Namespace::Forms, "send", "Senden"));
        cache.insert(entry(Namespace::Forms, "send", "Absenden"));

        assert_eq!(cache.len(), 1);
        let cached = cache.get(Namespace::Forms).unwrap();
        assert_eq!(cached.resource.lookup("send"), Some("Absenden"));
    }

    #[test]
    fn test_entries_are_keyed_per_namespace() {
        let cache = TranslationCache::new();
        cache.insert(entry(Namespace::Common, "loading", "Wird geladen..."));
        cache.insert(entry(Namespace::Navigation, "home", "Startseite"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(Namespace::Products).is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let cache = TranslationCache::new();
        cache.insert(entry(Namespace::Common, "loading", "Wird geladen..."));
        cache.insert(entry(Namespace::Products, "buyNow", "Jetzt kaufen"));

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get(Namespace::Common).is_none());
        assert!(cache.get(Namespace::Products).is_none());
    }

    #[test]
    fn test_clones_share_underlying_state() {
        let cache = TranslationCache::new();
        let other = cache.clone();

        cache.insert(entry(Namespace::Navigation, "home", "Startseite"));
        assert!(other.contains(Namespace::Navigation));

        other.clear();
        assert!(cache.is_empty());
    }
}
