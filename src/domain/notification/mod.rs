//! Notification domain

pub mod entity;
pub mod repository;

pub use entity::{Notification, NotificationKind};
pub use repository::NotificationRepository;
