//! Notification use cases

use super::macros::use_case;
use crate::domain::notification::{Notification, NotificationRepository};
use crate::domain::shared::{NotificationId, Page, PageRequest, UserId};

use_case! {
    ListNotifications(NotificationRepository) => list_notifications(user_id: &UserId, page: PageRequest) -> Page<Notification>;
    GetUnreadCount(NotificationRepository) => unread_count(user_id: &UserId) -> usize;
    MarkNotificationAsRead(NotificationRepository) => mark_as_read(id: &NotificationId) -> ();
    MarkAllNotificationsAsRead(NotificationRepository) => mark_all_as_read(user_id: &UserId) -> ();
    DeleteNotification(NotificationRepository) => delete_notification(id: &NotificationId) -> ();
}
