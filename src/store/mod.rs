pub mod disk;
pub mod memory;

use crate::core::storage::{KeyValueCollection, Store};
use anyhow::{Context, Result};
use disk::DiskCollection;
use fjall::{Keyspace, PartitionCreateOptions};
use memory::MemoryCollection;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};
use tracing::{debug, warn};

/// A thread-safe key-value store that can hold multiple collections.
pub struct KeyValueStore {
    collections: RwLock<HashMap<String, Arc<dyn KeyValueCollection>>>,
    keyspace: Option<Arc<Keyspace>>,
}

impl KeyValueStore {
    /// Opens a store persisted under `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let store_dir = path.join("store");
        std::fs::create_dir_all(&store_dir)
            .with_context(|| format!("Failed to create directory: {}", store_dir.display()))?;
        let keyspace = fjall::Config::new(&store_dir)
            .open()
            .with_context(|| format!("Failed to open store at {}", store_dir.display()))?;
        debug!("Opened store at {}", store_dir.display());

        Ok(Self {
            collections: RwLock::new(HashMap::new()),
            keyspace: Some(Arc::new(keyspace)),
        })
    }

    /// A store without a backing keyspace; only non-persistent collections.
    pub fn in_memory() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace: None,
        }
    }

    fn create_collection(&self, name: &str, persist: bool) -> Option<Arc<dyn KeyValueCollection>> {
        if !persist {
            return Some(Arc::new(MemoryCollection::new()));
        }

        let keyspace = self.keyspace.as_ref()?;
        match keyspace.open_partition(name, PartitionCreateOptions::default()) {
            Ok(partition) => Some(Arc::new(DiskCollection::new(
                Arc::clone(keyspace),
                partition,
            ))),
            Err(e) => {
                warn!("Failed to open collection {}: {}", name, e);
                None
            }
        }
    }
}

impl Store for KeyValueStore {
    fn get_collection(&self, name: &str, persist: bool) -> Option<Arc<dyn KeyValueCollection>> {
        if let Ok(collections) = self.collections.read() {
            if let Some(collection) = collections.get(name) {
                return Some(Arc::clone(collection));
            }
        }

        let mut collections = self.collections.write().ok()?;
        if let Some(collection) = collections.get(name) {
            return Some(Arc::clone(collection));
        }
        let collection = self.create_collection(name, persist)?;
        collections.insert(name.to_string(), Arc::clone(&collection));
        Some(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_collection_is_shared_by_name() {
        let store = KeyValueStore::in_memory();
        let first = store.get_collection("watchlist", false).unwrap();
        let second = store.get_collection("watchlist", false).unwrap();

        first.put("k", b"v".to_vec()).await.unwrap();
        assert_eq!(second.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_handles_share_write_lock() {
        let store = KeyValueStore::in_memory();
        let first = store.get_collection("watchlist", false).unwrap();
        let second = store.get_collection("watchlist", false).unwrap();
        assert!(std::ptr::eq(first.write_lock(), second.write_lock()));

        let _guard = first.write_lock().lock().await;
        assert!(second.write_lock().try_lock().is_err());
    }

    #[test]
    fn test_in_memory_store_has_no_persistent_collections() {
        let store = KeyValueStore::in_memory();
        assert!(store.get_collection("watchlist", true).is_none());
        assert!(store.get_collection("watchlist", false).is_some());
    }

    #[tokio::test]
    async fn test_persistent_collection_round_trip() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path()).unwrap();
        let collection = store.get_collection("watchlist", true).unwrap();

        collection.put("symbols", b"[\"AAPL\"]".to_vec()).await.unwrap();
        assert_eq!(
            collection.get("symbols").await.unwrap(),
            Some(b"[\"AAPL\"]".to_vec())
        );
        assert!(dir.path().join("store").exists());
    }
}
