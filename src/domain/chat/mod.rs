//! Messaging domain

pub mod entity;
pub mod repository;

pub use entity::{Conversation, Message, NewMessage};
pub use repository::ChatRepository;
