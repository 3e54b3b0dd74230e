use crate::domain::chat::{Conversation, Message, NewMessage};
use crate::domain::shared::{ConversationId, MessageId, UserId};
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::remote::chat::{ConversationModel, MessageModel};

pub fn conversation_to_entity(model: ConversationModel) -> Conversation {
    Conversation {
        id: ConversationId::new(model.id),
        participant_ids: model.participant_ids.into_iter().map(UserId::new).collect(),
        last_message: model.last_message,
        last_sender_id: model.last_sender_id.map(UserId::new),
        unread_by: model.unread_by.into_iter().map(UserId::new).collect(),
        updated_at: model.updated_at.to_datetime(),
    }
}

pub fn message_to_entity(model: MessageModel) -> Message {
    Message {
        id: MessageId::new(model.id),
        conversation_id: ConversationId::new(model.conversation_id),
        sender_id: UserId::new(model.sender_id),
        body: model.body,
        sent_at: model.sent_at.to_datetime(),
    }
}

pub fn message_to_model(data: NewMessage) -> MessageModel {
    MessageModel {
        id: String::new(),
        conversation_id: data.conversation_id.into_inner(),
        sender_id: data.sender_id.into_inner(),
        body: data.body,
        sent_at: WireTimestamp::now(),
    }
}
