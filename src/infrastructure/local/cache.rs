//! Typed JSON cache over a key-value store

use super::KeyValueStore;
use crate::infrastructure::error::{DataSourceError, DataSourceResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Cache of `M` values stored under `<prefix>:<id>`
pub struct LocalCache<M> {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
    _model: PhantomData<fn() -> M>,
}

impl<M> Clone for LocalCache<M> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            prefix: self.prefix.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for LocalCache<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCache").field("prefix", &self.prefix).finish()
    }
}

impl<M> LocalCache<M>
where
    M: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            _model: PhantomData,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn key(&self, id: &str) -> String {
        format!("{}:{}", self.prefix, id)
    }

    pub async fn get(&self, id: &str) -> DataSourceResult<Option<M>> {
        let key = self.key(id);
        match self.store.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| DataSourceError::cache(format!("Corrupt cache entry {}: {}", key, e))),
            None => Ok(None),
        }
    }

    pub async fn put(&self, id: &str, value: &M) -> DataSourceResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| DataSourceError::cache(format!("Cannot encode cache entry: {}", e)))?;
        self.store.set(&self.key(id), raw).await?;
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> DataSourceResult<()> {
        self.store.remove(&self.key(id)).await?;
        Ok(())
    }

    /// Remove every entry under this prefix
    pub async fn clear(&self) -> DataSourceResult<()> {
        let scope = format!("{}:", self.prefix);
        for key in self.store.keys(&scope).await? {
            self.store.remove(&key).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::local::{MemoryKeyValueStore, WireTimestamp};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        created_at: WireTimestamp,
    }

    fn cache() -> (Arc<MemoryKeyValueStore>, LocalCache<Row>) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let cache = LocalCache::new(store.clone(), "@reviewhub/test");
        (store, cache)
    }

    #[tokio::test]
    async fn test_timestamps_round_trip_as_pairs() {
        let (store, cache) = cache();
        let row = Row {
            id: "r1".to_string(),
            created_at: WireTimestamp::new(1_700_000_000, 42),
        };
        cache.put("r1", &row).await.unwrap();

        let raw = store.raw("@reviewhub/test:r1").await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["created_at"]["seconds"], 1_700_000_000i64);
        assert_eq!(json["created_at"]["nanoseconds"], 42);

        assert_eq!(cache.get("r1").await.unwrap(), Some(row));
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_cache_error() {
        let (store, cache) = cache();
        store.set("@reviewhub/test:bad", "{".to_string()).await.unwrap();
        let err = cache.get("bad").await.unwrap_err();
        assert!(matches!(err, DataSourceError::Cache { .. }));
    }

    #[tokio::test]
    async fn test_clear_only_touches_own_prefix() {
        let (store, cache) = cache();
        let row = Row {
            id: "r1".to_string(),
            created_at: WireTimestamp::new(1, 0),
        };
        cache.put("r1", &row).await.unwrap();
        cache.put("r2", &row).await.unwrap();
        store.set("@reviewhub/other:x", "1".to_string()).await.unwrap();

        cache.clear().await.unwrap();
        assert_eq!(cache.get("r1").await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_storage_failure_is_cache_error() {
        let (store, cache) = cache();
        store.set_fail_reads(true);
        let err = cache.get("r1").await.unwrap_err();
        assert!(matches!(err, DataSourceError::Cache { .. }));
    }
}
