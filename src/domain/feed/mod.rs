//! Social feed domain

pub mod entity;
pub mod repository;

pub use entity::{Comment, NewComment, NewPost, Post};
pub use repository::FeedRepository;
