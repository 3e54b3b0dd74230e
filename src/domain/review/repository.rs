//! Review repository interface

use super::entity::{NewReview, Review, ReviewUpdate};
use crate::domain::shared::{BusinessId, Page, PageRequest, Result, ReviewId, UserId};
use async_trait::async_trait;

/// Review repository trait
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list_reviews(&self, business_id: &BusinessId, page: PageRequest) -> Result<Page<Review>>;

    async fn list_user_reviews(&self, user_id: &UserId) -> Result<Vec<Review>>;

    async fn create_review(&self, data: NewReview) -> Result<Review>;

    async fn update_review(&self, id: &ReviewId, update: ReviewUpdate) -> Result<Review>;

    async fn delete_review(&self, id: &ReviewId) -> Result<()>;
}
