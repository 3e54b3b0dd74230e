//! Business repository interface

use super::entity::{Business, BusinessUpdate, NewBusiness};
use crate::domain::shared::{BusinessId, Page, PageRequest, Result};
use async_trait::async_trait;

/// Business repository trait
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn get_business(&self, id: &BusinessId) -> Result<Business>;

    /// List businesses, optionally restricted to one category
    async fn list_businesses(&self, category: Option<&str>, page: PageRequest) -> Result<Page<Business>>;

    /// Case-insensitive name prefix search
    async fn search_businesses(&self, term: &str, page: PageRequest) -> Result<Page<Business>>;

    async fn create_business(&self, data: NewBusiness) -> Result<Business>;

    async fn update_business(&self, id: &BusinessId, update: BusinessUpdate) -> Result<Business>;

    async fn delete_business(&self, id: &BusinessId) -> Result<()>;
}
