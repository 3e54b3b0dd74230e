//! Domain layer - Entities and repository ports
//!
//! This layer contains:
//! - Entities: UI-facing records produced by the mappers
//! - Repository interfaces: ports returning `Result<T, Failure>`
//! - The shared kernel: failures, the fold eliminator, pagination, ids

pub mod auth;
pub mod business;
pub mod chat;
pub mod feed;
pub mod notification;
pub mod review;
pub mod settings;
pub mod shared;
pub mod user;
pub mod wishlist;

// Re-export commonly used types
pub use shared::{Failure, Fold, Result};
