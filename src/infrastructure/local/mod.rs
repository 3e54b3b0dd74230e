//! Local persistence
//!
//! A string key-value store (the device storage) plus a typed JSON cache on
//! top of it. Keys are a fixed per-feature prefix followed by an entity id.

pub mod cache;
pub mod file;
pub mod memory;
pub mod timestamp;

use crate::infrastructure::error::{DataSourceError, DataSourceResult};
use async_trait::async_trait;
use thiserror::Error;

pub use cache::LocalCache;
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use timestamp::WireTimestamp;

/// Key prefixes, one per feature
pub mod keys {
    /// Common root of every key the app writes
    pub const ROOT: &str = "@reviewhub/";
    pub const AUTH_SESSION: &str = "@reviewhub/auth";
    pub const PROFILE: &str = "@reviewhub/profile";
    pub const BUSINESS: &str = "@reviewhub/business";
    pub const BUSINESS_PAGE: &str = "@reviewhub/business_page";
    pub const REVIEWS: &str = "@reviewhub/reviews";
    pub const FEED: &str = "@reviewhub/feed";
    pub const CONVERSATIONS: &str = "@reviewhub/conversations";
    pub const MESSAGES: &str = "@reviewhub/messages";
    pub const WISHLIST: &str = "@reviewhub/wishlist";
    pub const NOTIFICATIONS: &str = "@reviewhub/notifications";
    pub const SETTINGS: &str = "@reviewhub/settings";
    pub const FEATURE_FLAGS: &str = "@reviewhub/feature_flags";
}

/// Device storage error
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is corrupt: {0}")]
    Corrupt(String),
}

impl From<StorageError> for DataSourceError {
    fn from(e: StorageError) -> Self {
        DataSourceError::cache(e.to_string())
    }
}

/// String key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All keys starting with `prefix`
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// Remove every key starting with `prefix`
pub async fn clear_prefix(store: &dyn KeyValueStore, prefix: &str) -> DataSourceResult<()> {
    for key in store.keys(prefix).await? {
        store.remove(&key).await?;
    }
    Ok(())
}
