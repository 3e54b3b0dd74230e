//! Notification list state

use crate::application::notification::{GetUnreadCount, ListNotifications, MarkNotificationAsRead};
use crate::domain::notification::{Notification, NotificationRepository};
use crate::domain::shared::{Failure, NotificationId, PageRequest, Result, UserId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationState {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct NotificationStore {
    state: Arc<RwLock<NotificationState>>,
    list: ListNotifications,
    unread_count: GetUnreadCount,
    mark_as_read: MarkNotificationAsRead,
    page_size: usize,
}

impl NotificationStore {
    pub fn new(repository: Arc<dyn NotificationRepository>, page_size: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(NotificationState::default())),
            list: ListNotifications::new(repository.clone()),
            unread_count: GetUnreadCount::new(repository.clone()),
            mark_as_read: MarkNotificationAsRead::new(repository),
            page_size,
        }
    }

    pub async fn snapshot(&self) -> NotificationState {
        self.state.read().await.clone()
    }

    pub async fn reset(&self) {
        *self.state.write().await = NotificationState::default();
    }

    /// Load the newest notifications together with the unread badge count
    pub async fn load(&self, user_id: &UserId) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let (page, unread) = futures::join!(
            self.list.execute(user_id, PageRequest::first(self.page_size)),
            self.unread_count.execute(user_id)
        );

        let mut state = self.state.write().await;
        state.loading = false;
        match (page, unread) {
            (Ok(page), Ok(unread)) => {
                state.notifications = page.items;
                state.unread_count = unread;
                Ok(())
            }
            (Err(failure), _) | (_, Err(failure)) => {
                state.error = Some(failure.message().to_string());
                Err(failure)
            }
        }
    }

    /// Mark one notification read locally, then on the remote.
    ///
    /// Both the flag and the badge count are restored on failure.
    pub async fn mark_as_read(&self, id: &NotificationId) -> Result<()> {
        let (previous, previous_unread) = {
            let mut state = self.state.write().await;
            let previous_unread = state.unread_count;
            let Some(notification) = state.notifications.iter_mut().find(|n| &n.id == id) else {
                return Err(Failure::validation(format!("Notification {} is not loaded", id)));
            };
            if notification.read {
                return Ok(());
            }
            let previous = notification.clone();
            notification.read = true;
            state.unread_count = state.unread_count.saturating_sub(1);
            (previous, previous_unread)
        };

        if let Err(failure) = self.mark_as_read.execute(id).await {
            warn!("Marking {} read failed, rolling back: {}", id, failure);
            let mut state = self.state.write().await;
            if let Some(notification) = state.notifications.iter_mut().find(|n| &n.id == id) {
                *notification = previous;
            }
            state.unread_count = previous_unread;
            state.error = Some(failure.message().to_string());
            return Err(failure);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotificationKind;
    use crate::domain::shared::Page;
    use crate::interface::state::mocks::MockNotifications;
    use chrono::Utc;

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id),
            recipient_id: UserId::new("u1"),
            kind: NotificationKind::Comment,
            title: "New comment".to_string(),
            body: "Someone replied".to_string(),
            read,
            created_at: Utc::now(),
        }
    }

    fn repository() -> MockNotifications {
        let mut repository = MockNotifications::new();
        repository.expect_list_notifications().returning(|_, _| {
            Ok(Page::from_items(
                vec![notification("n1", false), notification("n2", true)],
                20,
                |n: &Notification| n.id.to_string(),
            ))
        });
        repository.expect_unread_count().returning(|_| Ok(1));
        repository
    }

    #[tokio::test]
    async fn test_load_sets_list_and_count() {
        let store = NotificationStore::new(Arc::new(repository()), 20);

        store.load(&UserId::new("u1")).await.unwrap();

        let state = store.snapshot().await;
        assert_eq!(state.notifications.len(), 2);
        assert_eq!(state.unread_count, 1);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_failed_mark_as_read_rolls_back() {
        let mut repository = repository();
        repository
            .expect_mark_as_read()
            .times(1)
            .returning(|_| Err(Failure::network("Cannot mark notification as read while offline")));
        let store = NotificationStore::new(Arc::new(repository), 20);
        store.load(&UserId::new("u1")).await.unwrap();
        let before = store.snapshot().await;

        assert!(store.mark_as_read(&NotificationId::new("n1")).await.is_err());

        let after = store.snapshot().await;
        assert_eq!(after.notifications, before.notifications);
        assert_eq!(after.unread_count, 1);
        assert_eq!(
            after.error.as_deref(),
            Some("Cannot mark notification as read while offline")
        );
    }

    #[tokio::test]
    async fn test_already_read_is_not_sent() {
        let mut repository = repository();
        repository.expect_mark_as_read().never();
        let store = NotificationStore::new(Arc::new(repository), 20);
        store.load(&UserId::new("u1")).await.unwrap();

        store.mark_as_read(&NotificationId::new("n2")).await.unwrap();

        assert_eq!(store.snapshot().await.unread_count, 1);
    }

    #[tokio::test]
    async fn test_mark_as_read_decrements_badge() {
        let mut repository = repository();
        repository.expect_mark_as_read().times(1).returning(|_| Ok(()));
        let store = NotificationStore::new(Arc::new(repository), 20);
        store.load(&UserId::new("u1")).await.unwrap();

        store.mark_as_read(&NotificationId::new("n1")).await.unwrap();

        let state = store.snapshot().await;
        assert_eq!(state.unread_count, 0);
        assert!(state.notifications.iter().all(|n| n.read));
    }
}
