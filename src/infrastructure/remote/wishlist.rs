//! Wishlist data source
//!
//! One document per (user, business) pair, keyed `<user>_<business>`.

use super::{collections, decode_all, to_fields};
use crate::infrastructure::error::DataSourceResult;
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::platform::{Direction, DocumentStore, Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Saved business record in the `wishlists` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItemModel {
    pub user_id: String,
    pub business_id: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub added_at: WireTimestamp,
}

fn entry_id(user_id: &str, business_id: &str) -> String {
    format!("{}_{}", user_id, business_id)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRemoteDataSource: Send + Sync {
    /// Saved businesses, most recently added first
    async fn get_wishlist(&self, user_id: &str) -> DataSourceResult<Vec<WishlistItemModel>>;

    async fn add_to_wishlist(&self, item: WishlistItemModel) -> DataSourceResult<WishlistItemModel>;

    async fn remove_from_wishlist(&self, user_id: &str, business_id: &str) -> DataSourceResult<()>;

    async fn is_in_wishlist(&self, user_id: &str, business_id: &str) -> DataSourceResult<bool>;
}

pub struct PlatformWishlistDataSource {
    store: Arc<dyn DocumentStore>,
}

impl PlatformWishlistDataSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WishlistRemoteDataSource for PlatformWishlistDataSource {
    async fn get_wishlist(&self, user_id: &str) -> DataSourceResult<Vec<WishlistItemModel>> {
        let query = Query::new()
            .where_eq("user_id", user_id)
            .order_by("added_at", Direction::Descending);
        decode_all(self.store.query(collections::WISHLISTS, &query).await?)
    }

    async fn add_to_wishlist(&self, item: WishlistItemModel) -> DataSourceResult<WishlistItemModel> {
        let id = entry_id(&item.user_id, &item.business_id);
        self.store.set(collections::WISHLISTS, &id, to_fields(&item)?).await?;
        Ok(item)
    }

    async fn remove_from_wishlist(&self, user_id: &str, business_id: &str) -> DataSourceResult<()> {
        self.store
            .delete(collections::WISHLISTS, &entry_id(user_id, business_id))
            .await?;
        Ok(())
    }

    async fn is_in_wishlist(&self, user_id: &str, business_id: &str) -> DataSourceResult<bool> {
        let document = self
            .store
            .get(collections::WISHLISTS, &entry_id(user_id, business_id))
            .await?;
        Ok(document.is_some())
    }
}
