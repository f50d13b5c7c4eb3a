//! In-process session store backed by DashMap. Stands in for the browser's
//! `sessionStorage` in native hosts and tests.

use std::collections::BTreeMap;

use conversion_core::ConversionResult;
use dashmap::DashMap;
use tracing::debug;

use crate::store::SessionStore;

/// Lock-free in-memory session store. Lives as long as the session it models.
#[derive(Debug, Default)]
pub struct LocalSessionStore {
    store: DashMap<String, String>,
}

impl LocalSessionStore {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Sorted copy of every entry.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.store
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl SessionStore for LocalSessionStore {
    fn get(&self, key: &str) -> ConversionResult<Option<String>> {
        Ok(self.store.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> ConversionResult<()> {
        self.store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ConversionResult<()> {
        self.store.remove(key);
        Ok(())
    }

    fn clear(&self) -> ConversionResult<()> {
        let dropped = self.store.len();
        self.store.clear();
        debug!(dropped, "session store cleared");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::keys;
    use std::sync::Arc;

    #[test]
    fn test_get_missing_key() {
        let store = LocalSessionStore::new();
        assert_eq!(store.get(keys::PAGES_LOG).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let store = LocalSessionStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = LocalSessionStore::new();
        store.set(&keys::converted("A"), keys::CONVERTED_VALUE).unwrap();
        store.set(&keys::converted("B"), keys::CONVERTED_VALUE).unwrap();

        store.remove(&keys::converted("A")).unwrap();
        assert_eq!(store.get(&keys::converted("A")).unwrap(), None);
        assert_eq!(store.len(), 1);

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let store = Arc::new(LocalSessionStore::new());
        let handle = Arc::clone(&store);
        handle.set("k", "v").unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.get("k").map(String::as_str), Some("v"));
    }
}
