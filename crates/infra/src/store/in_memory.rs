use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use super::{DocumentStore, StoreError, validate_collection};

/// In-memory document store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<String, Vec<JsonValue>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        validate_collection(collection)?;
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(collection).cloned().unwrap_or_default())
    }

    fn save(&self, collection: &str, records: &[JsonValue]) -> Result<(), StoreError> {
        validate_collection(collection)?;
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(collection.to_string(), records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_collection_loads_empty() {
        let store = InMemoryDocumentStore::new();
        assert!(store.load("inventory").unwrap().is_empty());
    }

    #[test]
    fn save_replaces_collection() {
        let store = InMemoryDocumentStore::new();
        store.save("inventory", &[json!({"a": 1}), json!({"a": 2})]).unwrap();
        store.save("inventory", &[json!({"a": 3})]).unwrap();
        assert_eq!(store.load("inventory").unwrap(), vec![json!({"a": 3})]);
    }

    #[test]
    fn collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        store.save("inventory", &[json!(1)]).unwrap();
        assert!(store.load("recipes").unwrap().is_empty());
    }

    #[test]
    fn rejects_path_like_names() {
        let store = InMemoryDocumentStore::new();
        assert!(matches!(store.load("../etc"), Err(StoreError::InvalidCollection(_))));
    }
}
