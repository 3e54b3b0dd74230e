//! Chat repository interface

use super::entity::{Conversation, Message, NewMessage};
use crate::domain::shared::{ConversationId, Page, PageRequest, Result, UserId};
use async_trait::async_trait;

/// Chat repository trait
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn list_conversations(&self, user_id: &UserId) -> Result<Vec<Conversation>>;

    /// Newest messages first
    async fn get_messages(&self, conversation_id: &ConversationId, page: PageRequest) -> Result<Page<Message>>;

    async fn start_conversation(&self, participants: Vec<UserId>) -> Result<Conversation>;

    async fn send_message(&self, data: NewMessage) -> Result<Message>;

    async fn mark_conversation_read(&self, conversation_id: &ConversationId, user_id: &UserId) -> Result<()>;
}
