//! Wishlist repository interface

use super::entity::WishlistItem;
use crate::domain::business::Business;
use crate::domain::shared::{BusinessId, Result, UserId};
use async_trait::async_trait;

/// Wishlist repository trait
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Most recently added first
    async fn get_wishlist(&self, user_id: &UserId) -> Result<Vec<WishlistItem>>;

    async fn add_to_wishlist(&self, user_id: &UserId, business: &Business) -> Result<WishlistItem>;

    async fn remove_from_wishlist(&self, user_id: &UserId, business_id: &BusinessId) -> Result<()>;

    async fn is_in_wishlist(&self, user_id: &UserId, business_id: &BusinessId) -> Result<bool>;
}
