//! File-backed key-value store
//!
//! Persists every entry in one JSON object on disk, rewritten atomically
//! (write to a sibling temp file, then rename) on each mutation.

use super::{KeyValueStore, StorageError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Use `path` as the backing file, creating parent directories as needed
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        debug!("Opened key-value store at {}", path.display());
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(entries).map_err(|e| StorageError::Write(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value);
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self
            .load()
            .await?
            .into_keys()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("store.json");

        let store = FileKeyValueStore::open(&path).await.unwrap();
        store.set("@reviewhub/profile:u1", "{}".to_string()).await.unwrap();
        store.set("@reviewhub/feed:first", "[]".to_string()).await.unwrap();
        drop(store);

        let reopened = FileKeyValueStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("@reviewhub/profile:u1").await.unwrap(),
            Some("{}".to_string())
        );
        assert_eq!(reopened.keys("@reviewhub/feed").await.unwrap().len(), 1);

        reopened.remove("@reviewhub/feed:first").await.unwrap();
        assert!(reopened.keys("@reviewhub/feed").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = FileKeyValueStore::open(&path).await.unwrap();
        let err = store.get("k").await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
