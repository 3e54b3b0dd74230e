//! Application layer - Use cases
//!
//! One narrowly named use case per repository operation. Use cases forward
//! to their repository unchanged; the only one that checks its input before
//! forwarding is [`profile::UpdateUserRole`].

mod macros;

pub mod auth;
pub mod business;
pub mod chat;
pub mod feed;
pub mod notification;
pub mod profile;
pub mod review;
pub mod settings;
pub mod wishlist;
