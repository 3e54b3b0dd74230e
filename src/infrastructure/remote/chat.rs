//! Direct messaging data source

use super::{collections, decode, decode_all, require, to_fields, PageQuery};
use crate::infrastructure::error::{DataSourceError, DataSourceResult};
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::platform::{Direction, DocumentStore, Fields, Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Conversation record in the `conversations` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationModel {
    pub id: String,
    pub participant_ids: Vec<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_sender_id: Option<String>,
    #[serde(default)]
    pub unread_by: Vec<String>,
    #[serde(default)]
    pub updated_at: WireTimestamp,
}

/// Message record in the `messages` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageModel {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub sent_at: WireTimestamp,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRemoteDataSource: Send + Sync {
    /// Conversations the user takes part in, most recently active first
    async fn list_conversations(&self, user_id: &str) -> DataSourceResult<Vec<ConversationModel>>;

    /// Messages of a conversation, newest first
    async fn get_messages(&self, conversation_id: &str, page: PageQuery) -> DataSourceResult<Vec<MessageModel>>;

    /// Open the conversation between `participants`, reusing an existing one
    async fn start_conversation(&self, participants: Vec<String>) -> DataSourceResult<ConversationModel>;

    async fn send_message(&self, message: MessageModel) -> DataSourceResult<MessageModel>;

    async fn mark_conversation_read(&self, conversation_id: &str, user_id: &str) -> DataSourceResult<()>;
}

pub struct PlatformChatDataSource {
    store: Arc<dyn DocumentStore>,
}

impl PlatformChatDataSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn get_conversation(&self, id: &str) -> DataSourceResult<ConversationModel> {
        let document = self.store.get(collections::CONVERSATIONS, id).await?;
        require(document, "Conversation")
    }
}

#[async_trait]
impl ChatRemoteDataSource for PlatformChatDataSource {
    async fn list_conversations(&self, user_id: &str) -> DataSourceResult<Vec<ConversationModel>> {
        let query = Query::new()
            .array_contains("participant_ids", user_id)
            .order_by("updated_at", Direction::Descending);
        decode_all(self.store.query(collections::CONVERSATIONS, &query).await?)
    }

    async fn get_messages(&self, conversation_id: &str, page: PageQuery) -> DataSourceResult<Vec<MessageModel>> {
        let query = page.apply(
            Query::new()
                .where_eq("conversation_id", conversation_id)
                .order_by("sent_at", Direction::Descending),
        );
        decode_all(self.store.query(collections::MESSAGES, &query).await?)
    }

    async fn start_conversation(&self, participants: Vec<String>) -> DataSourceResult<ConversationModel> {
        let wanted: BTreeSet<String> = participants.into_iter().collect();
        let Some(first) = wanted.iter().next().cloned() else {
            return Err(DataSourceError::validation("A conversation needs participants"));
        };
        if wanted.len() < 2 {
            return Err(DataSourceError::validation("A conversation needs at least two participants"));
        }

        let query = Query::new().array_contains("participant_ids", first.as_str());
        for document in self.store.query(collections::CONVERSATIONS, &query).await? {
            let existing: ConversationModel = decode(document)?;
            let members: BTreeSet<String> = existing.participant_ids.iter().cloned().collect();
            if members == wanted {
                debug!("Reusing conversation {}", existing.id);
                return Ok(existing);
            }
        }

        let mut conversation = ConversationModel {
            id: String::new(),
            participant_ids: wanted.into_iter().collect(),
            last_message: None,
            last_sender_id: None,
            unread_by: Vec::new(),
            updated_at: WireTimestamp::now(),
        };
        conversation.id = self
            .store
            .add(collections::CONVERSATIONS, to_fields(&conversation)?)
            .await?;
        Ok(conversation)
    }

    async fn send_message(&self, mut message: MessageModel) -> DataSourceResult<MessageModel> {
        let conversation = self.get_conversation(&message.conversation_id).await?;
        if !conversation.participant_ids.contains(&message.sender_id) {
            return Err(DataSourceError::permission("Sender is not part of this conversation"));
        }

        message.id = self.store.add(collections::MESSAGES, to_fields(&message)?).await?;

        let unread_by: Vec<String> = conversation
            .participant_ids
            .into_iter()
            .filter(|id| id != &message.sender_id)
            .collect();
        let mut partial = Fields::new();
        partial.insert("last_message".to_string(), json!(message.body));
        partial.insert("last_sender_id".to_string(), json!(message.sender_id));
        partial.insert("unread_by".to_string(), json!(unread_by));
        partial.insert("updated_at".to_string(), json!(message.sent_at));
        self.store
            .update(collections::CONVERSATIONS, &message.conversation_id, partial)
            .await?;

        Ok(message)
    }

    async fn mark_conversation_read(&self, conversation_id: &str, user_id: &str) -> DataSourceResult<()> {
        self.store
            .array_remove(collections::CONVERSATIONS, conversation_id, "unread_by", json!(user_id))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::MemoryDocumentStore;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn message(conversation_id: &str, sender_id: &str, body: &str) -> MessageModel {
        MessageModel {
            id: String::new(),
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            body: body.to_string(),
            sent_at: WireTimestamp::now(),
        }
    }

    #[tokio::test]
    async fn test_start_conversation_reuses_same_participants() {
        let source = PlatformChatDataSource::new(Arc::new(MemoryDocumentStore::new()));

        let first = source.start_conversation(ids(&["u1", "u2"])).await.unwrap();
        let again = source.start_conversation(ids(&["u2", "u1"])).await.unwrap();
        let other = source.start_conversation(ids(&["u1", "u3"])).await.unwrap();

        assert_eq!(first.id, again.id);
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_single_participant_is_rejected() {
        let source = PlatformChatDataSource::new(Arc::new(MemoryDocumentStore::new()));

        let err = source.start_conversation(ids(&["u1", "u1"])).await.unwrap_err();

        assert!(matches!(err, DataSourceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_send_marks_unread_for_others() {
        let source = PlatformChatDataSource::new(Arc::new(MemoryDocumentStore::new()));
        let conversation = source.start_conversation(ids(&["u1", "u2"])).await.unwrap();

        source
            .send_message(message(&conversation.id, "u1", "hello"))
            .await
            .unwrap();

        let listed = source.list_conversations("u2").await.unwrap();
        assert_eq!(listed[0].last_message.as_deref(), Some("hello"));
        assert_eq!(listed[0].unread_by, ids(&["u2"]));

        source.mark_conversation_read(&conversation.id, "u2").await.unwrap();
        let listed = source.list_conversations("u2").await.unwrap();
        assert!(listed[0].unread_by.is_empty());
    }

    #[tokio::test]
    async fn test_outsider_cannot_send() {
        let source = PlatformChatDataSource::new(Arc::new(MemoryDocumentStore::new()));
        let conversation = source.start_conversation(ids(&["u1", "u2"])).await.unwrap();

        let err = source
            .send_message(message(&conversation.id, "u9", "hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, DataSourceError::Permission { .. }));
    }
}
