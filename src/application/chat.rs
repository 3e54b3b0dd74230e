//! Direct messaging use cases

use super::macros::use_case;
use crate::domain::chat::{ChatRepository, Conversation, Message, NewMessage};
use crate::domain::shared::{ConversationId, Page, PageRequest, UserId};

use_case! {
    ListConversations(ChatRepository) => list_conversations(user_id: &UserId) -> Vec<Conversation>;
    GetMessages(ChatRepository) => get_messages(conversation_id: &ConversationId, page: PageRequest) -> Page<Message>;
    StartConversation(ChatRepository) => start_conversation(participants: Vec<UserId>) -> Conversation;
    SendMessage(ChatRepository) => send_message(data: NewMessage) -> Message;
    MarkConversationRead(ChatRepository) => mark_conversation_read(conversation_id: &ConversationId, user_id: &UserId) -> ();
}
