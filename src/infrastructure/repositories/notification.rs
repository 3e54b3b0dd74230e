//! Notification repository

use crate::domain::notification::{Notification, NotificationRepository};
use crate::domain::shared::{NotificationId, Page, PageRequest, Result, UserId};
use crate::infrastructure::local::{keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::notification as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::notification::{NotificationModel, NotificationRemoteDataSource};
use crate::infrastructure::remote::PageQuery;
use async_trait::async_trait;
use std::sync::Arc;

pub struct NotificationRepositoryImpl {
    remote: Arc<dyn NotificationRemoteDataSource>,
    /// First page, keyed by user id
    notifications: LocalCache<Vec<NotificationModel>>,
    reconciler: Reconciler,
}

impl NotificationRepositoryImpl {
    pub fn new(
        remote: Arc<dyn NotificationRemoteDataSource>,
        storage: Arc<dyn KeyValueStore>,
        reconciler: Reconciler,
    ) -> Self {
        Self {
            remote,
            notifications: LocalCache::new(storage, keys::NOTIFICATIONS),
            reconciler,
        }
    }
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn list_notifications(&self, user_id: &UserId, page: PageRequest) -> Result<Page<Notification>> {
        let slot = if page.is_first() {
            Some((&self.notifications, user_id.as_str()))
        } else {
            None
        };
        let page_size = page.page_size;

        self.reconciler
            .read(
                "list notifications",
                ReadPolicy::NetworkFirst,
                slot,
                || self.remote.list_notifications(user_id.as_str(), PageQuery::from(&page)),
                |models| {
                    let items = models.into_iter().map(mapper::to_entity).collect();
                    Page::from_items(items, page_size, |n: &Notification| n.id.to_string())
                },
            )
            .await
    }

    async fn unread_count(&self, user_id: &UserId) -> Result<usize> {
        self.reconciler
            .read(
                "count unread notifications",
                ReadPolicy::NetworkFirst,
                None,
                || self.remote.unread_count(user_id.as_str()),
                |count| count,
            )
            .await
    }

    async fn mark_as_read(&self, id: &NotificationId) -> Result<()> {
        self.reconciler
            .write("mark notifications as read", || self.remote.mark_as_read(id.as_str()))
            .await
    }

    async fn mark_all_as_read(&self, user_id: &UserId) -> Result<()> {
        self.reconciler
            .write("mark notifications as read", || self.remote.mark_all_as_read(user_id.as_str()))
            .await?;
        best_effort("mark all as read", self.notifications.remove(user_id.as_str())).await;
        Ok(())
    }

    async fn delete_notification(&self, id: &NotificationId) -> Result<()> {
        self.reconciler
            .write("delete notifications", || self.remote.delete_notification(id.as_str()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotificationKind;
    use crate::domain::shared::FailureKind;
    use crate::infrastructure::error::DataSourceError;
    use crate::infrastructure::local::WireTimestamp;
    use crate::infrastructure::remote::notification::MockNotificationRemoteDataSource;
    use crate::infrastructure::repositories::test_support::harness;

    fn notification(id: &str, kind: &str) -> NotificationModel {
        NotificationModel {
            id: id.to_string(),
            recipient_id: "u1".to_string(),
            kind: kind.to_string(),
            title: "Hello".to_string(),
            body: String::new(),
            read: false,
            created_at: WireTimestamp::new(1_700_000_000, 0),
        }
    }

    #[tokio::test]
    async fn test_unknown_kind_maps_to_system() {
        let h = harness(true);
        let mut remote = MockNotificationRemoteDataSource::new();
        remote
            .expect_list_notifications()
            .returning(|_, _| Ok(vec![notification("n1", "like"), notification("n2", "poke")]));
        let repo = NotificationRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let page = repo
            .list_notifications(&UserId::new("u1"), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.items[0].kind, NotificationKind::Like);
        assert_eq!(page.items[1].kind, NotificationKind::System);
    }

    #[tokio::test]
    async fn test_unexpected_error_is_generic_server_failure() {
        let h = harness(true);
        let mut remote = MockNotificationRemoteDataSource::new();
        remote
            .expect_unread_count()
            .returning(|_| Err(DataSourceError::unexpected("index out of bounds at notifications.rs:42")));
        let repo = NotificationRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let failure = repo.unread_count(&UserId::new("u1")).await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Server);
        assert_eq!(failure.message(), "An unexpected error occurred");
    }

    #[tokio::test]
    async fn test_offline_mark_as_read_never_reaches_remote() {
        let h = harness(false);
        let mut remote = MockNotificationRemoteDataSource::new();
        remote.expect_mark_as_read().never();
        let repo = NotificationRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let failure = repo.mark_as_read(&NotificationId::new("n1")).await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Network);
    }
}
