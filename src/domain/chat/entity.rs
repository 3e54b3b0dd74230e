//! Chat entities

use crate::domain::shared::{ConversationId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation between two or more users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub participant_ids: Vec<UserId>,
    pub last_message: Option<String>,
    pub last_sender_id: Option<UserId>,
    pub unread_by: Vec<UserId>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn has_participant(&self, user_id: &UserId) -> bool {
        self.participant_ids.contains(user_id)
    }

    pub fn is_unread_for(&self, user_id: &UserId) -> bool {
        self.unread_by.contains(user_id)
    }
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Message creation data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub body: String,
}
