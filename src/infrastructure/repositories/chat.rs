//! Direct messaging repository

use crate::domain::chat::{ChatRepository, Conversation, Message, NewMessage};
use crate::domain::shared::{ConversationId, Page, PageRequest, Result, UserId};
use crate::infrastructure::local::{keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::chat as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::chat::{ChatRemoteDataSource, ConversationModel, MessageModel};
use crate::infrastructure::remote::PageQuery;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ChatRepositoryImpl {
    remote: Arc<dyn ChatRemoteDataSource>,
    /// Keyed by user id
    conversations: LocalCache<Vec<ConversationModel>>,
    /// First page, keyed by conversation id
    messages: LocalCache<Vec<MessageModel>>,
    reconciler: Reconciler,
}

impl ChatRepositoryImpl {
    pub fn new(remote: Arc<dyn ChatRemoteDataSource>, storage: Arc<dyn KeyValueStore>, reconciler: Reconciler) -> Self {
        Self {
            remote,
            conversations: LocalCache::new(storage.clone(), keys::CONVERSATIONS),
            messages: LocalCache::new(storage, keys::MESSAGES),
            reconciler,
        }
    }
}

#[async_trait]
impl ChatRepository for ChatRepositoryImpl {
    async fn list_conversations(&self, user_id: &UserId) -> Result<Vec<Conversation>> {
        self.reconciler
            .read(
                "list conversations",
                ReadPolicy::NetworkFirst,
                Some((&self.conversations, user_id.as_str())),
                || self.remote.list_conversations(user_id.as_str()),
                |models| models.into_iter().map(mapper::conversation_to_entity).collect(),
            )
            .await
    }

    async fn get_messages(&self, conversation_id: &ConversationId, page: PageRequest) -> Result<Page<Message>> {
        let slot = if page.is_first() {
            Some((&self.messages, conversation_id.as_str()))
        } else {
            None
        };
        let page_size = page.page_size;

        self.reconciler
            .read(
                "get messages",
                ReadPolicy::NetworkFirst,
                slot,
                || self.remote.get_messages(conversation_id.as_str(), PageQuery::from(&page)),
                |models| {
                    let items = models.into_iter().map(mapper::message_to_entity).collect();
                    Page::from_items(items, page_size, |m: &Message| m.id.to_string())
                },
            )
            .await
    }

    async fn start_conversation(&self, participants: Vec<UserId>) -> Result<Conversation> {
        let ids = participants.into_iter().map(UserId::into_inner).collect();
        let conversation = self
            .reconciler
            .write("start a conversation", || self.remote.start_conversation(ids))
            .await?;
        for participant in &conversation.participant_ids {
            best_effort("start conversation", self.conversations.remove(participant)).await;
        }
        Ok(mapper::conversation_to_entity(conversation))
    }

    async fn send_message(&self, data: NewMessage) -> Result<Message> {
        let model = mapper::message_to_model(data);
        let sent = self
            .reconciler
            .write("send messages", || self.remote.send_message(model))
            .await?;
        best_effort("send message", self.messages.remove(&sent.conversation_id)).await;
        Ok(mapper::message_to_entity(sent))
    }

    async fn mark_conversation_read(&self, conversation_id: &ConversationId, user_id: &UserId) -> Result<()> {
        self.reconciler
            .write("mark a conversation as read", || {
                self.remote
                    .mark_conversation_read(conversation_id.as_str(), user_id.as_str())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::FailureKind;
    use crate::infrastructure::error::DataSourceError;
    use crate::infrastructure::local::WireTimestamp;
    use crate::infrastructure::remote::chat::MockChatRemoteDataSource;
    use crate::infrastructure::repositories::test_support::harness;

    fn message(id: &str) -> MessageModel {
        MessageModel {
            id: id.to_string(),
            conversation_id: "c1".to_string(),
            sender_id: "u1".to_string(),
            body: format!("message {}", id),
            sent_at: WireTimestamp::new(1_700_000_000, 0),
        }
    }

    #[tokio::test]
    async fn test_messages_fall_back_to_cached_first_page() {
        let h = harness(true);
        let mut remote = MockChatRemoteDataSource::new();
        let mut calls = 0;
        remote.expect_get_messages().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(vec![message("m2"), message("m1")])
            } else {
                Err(DataSourceError::network("socket closed"))
            }
        });
        let repo = ChatRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());
        let conversation = ConversationId::new("c1");

        repo.get_messages(&conversation, PageRequest::first(2)).await.unwrap();
        let cached = repo.get_messages(&conversation, PageRequest::first(2)).await.unwrap();

        assert_eq!(cached.items.len(), 2);
        assert!(cached.has_more);
        assert_eq!(cached.next_cursor.map(|c| c.as_str().to_string()), Some("m1".to_string()));
    }

    #[tokio::test]
    async fn test_permission_failure_is_reported_verbatim() {
        let h = harness(true);
        let mut remote = MockChatRemoteDataSource::new();
        remote
            .expect_send_message()
            .returning(|_| Err(DataSourceError::permission("Sender is not part of this conversation")));
        let repo = ChatRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let failure = repo
            .send_message(NewMessage {
                conversation_id: ConversationId::new("c1"),
                sender_id: UserId::new("u9"),
                body: "hi".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Permission);
        assert_eq!(failure.message(), "Sender is not part of this conversation");
    }

    #[tokio::test]
    async fn test_offline_send_never_reaches_remote() {
        let h = harness(false);
        let mut remote = MockChatRemoteDataSource::new();
        remote.expect_send_message().never();
        let repo = ChatRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let failure = repo
            .send_message(NewMessage {
                conversation_id: ConversationId::new("c1"),
                sender_id: UserId::new("u1"),
                body: "hi".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(failure.message(), "Cannot send messages while offline");
    }
}
