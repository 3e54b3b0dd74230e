//! Notification entity

use crate::domain::shared::{NotificationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Message,
    Review,
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
            NotificationKind::Follow => "follow",
            NotificationKind::Message => "message",
            NotificationKind::Review => "review",
            NotificationKind::System => "system",
        }
    }

    /// Unknown kinds are treated as system notifications
    pub fn parse(s: &str) -> Self {
        match s {
            "like" => NotificationKind::Like,
            "comment" => NotificationKind::Comment,
            "follow" => NotificationKind::Follow,
            "message" => NotificationKind::Message,
            "review" => NotificationKind::Review,
            _ => NotificationKind::System,
        }
    }
}

/// An in-app notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
