//! Notification repository interface

use super::entity::Notification;
use crate::domain::shared::{NotificationId, Page, PageRequest, Result, UserId};
use async_trait::async_trait;

/// Notification repository trait
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Newest first
    async fn list_notifications(&self, user_id: &UserId, page: PageRequest) -> Result<Page<Notification>>;

    async fn unread_count(&self, user_id: &UserId) -> Result<usize>;

    async fn mark_as_read(&self, id: &NotificationId) -> Result<()>;

    async fn mark_all_as_read(&self, user_id: &UserId) -> Result<()>;

    async fn delete_notification(&self, id: &NotificationId) -> Result<()>;
}
