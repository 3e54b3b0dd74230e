use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::shared::{NotificationId, UserId};
use crate::infrastructure::remote::notification::NotificationModel;

pub fn to_entity(model: NotificationModel) -> Notification {
    Notification {
        id: NotificationId::new(model.id),
        recipient_id: UserId::new(model.recipient_id),
        kind: NotificationKind::parse(&model.kind),
        title: model.title,
        body: model.body,
        read: model.read,
        created_at: model.created_at.to_datetime(),
    }
}
