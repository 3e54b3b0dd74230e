//! Notification data source

use super::{collections, decode_all, PageQuery};
use crate::infrastructure::error::DataSourceResult;
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::platform::{Direction, DocumentStore, Fields, Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Notification record in the `notifications` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationModel {
    pub id: String,
    pub recipient_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: WireTimestamp,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRemoteDataSource: Send + Sync {
    /// Notifications of a user, newest first
    async fn list_notifications(&self, user_id: &str, page: PageQuery) -> DataSourceResult<Vec<NotificationModel>>;

    async fn unread_count(&self, user_id: &str) -> DataSourceResult<usize>;

    async fn mark_as_read(&self, id: &str) -> DataSourceResult<()>;

    async fn mark_all_as_read(&self, user_id: &str) -> DataSourceResult<()>;

    async fn delete_notification(&self, id: &str) -> DataSourceResult<()>;
}

pub struct PlatformNotificationDataSource {
    store: Arc<dyn DocumentStore>,
}

impl PlatformNotificationDataSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn read_flag() -> Fields {
        let mut partial = Fields::new();
        partial.insert("read".to_string(), json!(true));
        partial
    }
}

#[async_trait]
impl NotificationRemoteDataSource for PlatformNotificationDataSource {
    async fn list_notifications(&self, user_id: &str, page: PageQuery) -> DataSourceResult<Vec<NotificationModel>> {
        let query = page.apply(
            Query::new()
                .where_eq("recipient_id", user_id)
                .order_by("created_at", Direction::Descending),
        );
        decode_all(self.store.query(collections::NOTIFICATIONS, &query).await?)
    }

    async fn unread_count(&self, user_id: &str) -> DataSourceResult<usize> {
        let query = Query::new()
            .where_eq("recipient_id", user_id)
            .where_eq("read", false);
        Ok(self.store.query(collections::NOTIFICATIONS, &query).await?.len())
    }

    async fn mark_as_read(&self, id: &str) -> DataSourceResult<()> {
        self.store
            .update(collections::NOTIFICATIONS, id, Self::read_flag())
            .await?;
        Ok(())
    }

    async fn mark_all_as_read(&self, user_id: &str) -> DataSourceResult<()> {
        let query = Query::new()
            .where_eq("recipient_id", user_id)
            .where_eq("read", false);
        let unread = self.store.query(collections::NOTIFICATIONS, &query).await?;
        debug!("Marking {} notifications read for {}", unread.len(), user_id);

        for document in unread {
            self.store
                .update(collections::NOTIFICATIONS, &document.id, Self::read_flag())
                .await?;
        }
        Ok(())
    }

    async fn delete_notification(&self, id: &str) -> DataSourceResult<()> {
        self.store.delete(collections::NOTIFICATIONS, id).await?;
        Ok(())
    }
}
