use crate::core::error::StoreError;
use crate::core::storage::KeyValueCollection;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionHandle, PersistMode};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// A collection stored in a fjall partition.
pub struct DiskCollection {
    keyspace: Arc<Keyspace>,
    partition: PartitionHandle,
    write_lock: Mutex<()>,
}

impl DiskCollection {
    pub fn new(keyspace: Arc<Keyspace>, partition: PartitionHandle) -> Self {
        Self {
            keyspace,
            partition,
            write_lock: Mutex::new(()),
        }
    }

    fn sync(&self) -> Result<(), StoreError> {
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueCollection for DiskCollection {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let value = self.partition.get(key.as_bytes())?.map(|v| v.to_vec());
        debug!(key, hit = value.is_some(), "Disk GET");
        Ok(value)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.partition.insert(key.as_bytes(), value)?;
        self.sync()?;
        debug!(key, "Disk PUT");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.partition.remove(key.as_bytes())?;
        self.sync()?;
        debug!(key, "Disk REMOVE");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let keys = self
            .partition
            .keys()
            .collect::<Result<Vec<_>, fjall::Error>>()?;
        for key in keys {
            self.partition.remove(key)?;
        }
        self.sync()?;
        debug!("Disk CLEAR");
        Ok(())
    }

    fn write_lock(&self) -> &Mutex<()> {
        &self.write_lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fjall::PartitionCreateOptions;
    use tempfile::tempdir;

    fn open(path: &std::path::Path) -> DiskCollection {
        let keyspace = Arc::new(fjall::Config::new(path).open().unwrap());
        let partition = keyspace
            .open_partition("test", PartitionCreateOptions::default())
            .unwrap();
        DiskCollection::new(keyspace, partition)
    }

    #[tokio::test]
    async fn test_disk_get_put() {
        let dir = tempdir().unwrap();
        let collection = open(dir.path());

        assert!(collection.get("key1").await.unwrap().is_none());

        collection.put("key1", b"123".to_vec()).await.unwrap();
        assert_eq!(collection.get("key1").await.unwrap(), Some(b"123".to_vec()));
        assert!(collection.get("key2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_disk_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let collection = open(dir.path());
            collection.put("key1", b"kept".to_vec()).await.unwrap();
        }

        let reopened = open(dir.path());
        assert_eq!(reopened.get("key1").await.unwrap(), Some(b"kept".to_vec()));
    }

    #[tokio::test]
    async fn test_disk_remove_and_clear() {
        let dir = tempdir().unwrap();
        let collection = open(dir.path());

        collection.put("key1", b"1".to_vec()).await.unwrap();
        collection.put("key2", b"2".to_vec()).await.unwrap();

        collection.remove("key1").await.unwrap();
        assert!(collection.get("key1").await.unwrap().is_none());

        collection.clear().await.unwrap();
        assert!(collection.get("key2").await.unwrap().is_none());
    }
}
