//! In-memory store.

use std::collections::BTreeMap;

use super::DurableStore;
use crate::error::Result;
use crate::keys::StoreKey;

/// A store that lives as long as the process. Used by tests and
/// throwaway sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<StoreKey, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.entries.get(&key).cloned())
    }

    fn set(&mut self, key: StoreKey, value: &str) -> Result<()> {
        self.entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<()> {
        self.entries.remove(&key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(StoreKey::Query).unwrap(), None);

        store.set(StoreKey::Query, "\"?currency=USD\"").unwrap();
        assert_eq!(
            store.get(StoreKey::Query).unwrap().as_deref(),
            Some("\"?currency=USD\"")
        );

        store.remove(StoreKey::Query).unwrap();
        store.remove(StoreKey::Query).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = MemoryStore::new();
        for key in StoreKey::ALL {
            store.set(key, "1").unwrap();
        }
        assert_eq!(store.len(), 5);
        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
