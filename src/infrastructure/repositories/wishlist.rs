//! Wishlist repository

use crate::domain::business::Business;
use crate::domain::shared::{BusinessId, Result, UserId};
use crate::domain::wishlist::{WishlistItem, WishlistRepository};
use crate::infrastructure::local::{keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::wishlist as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::wishlist::{WishlistItemModel, WishlistRemoteDataSource};
use async_trait::async_trait;
use std::sync::Arc;

pub struct WishlistRepositoryImpl {
    remote: Arc<dyn WishlistRemoteDataSource>,
    /// Keyed by user id
    wishlists: LocalCache<Vec<WishlistItemModel>>,
    reconciler: Reconciler,
}

impl WishlistRepositoryImpl {
    pub fn new(remote: Arc<dyn WishlistRemoteDataSource>, storage: Arc<dyn KeyValueStore>, reconciler: Reconciler) -> Self {
        Self {
            remote,
            wishlists: LocalCache::new(storage, keys::WISHLIST),
            reconciler,
        }
    }
}

#[async_trait]
impl WishlistRepository for WishlistRepositoryImpl {
    async fn get_wishlist(&self, user_id: &UserId) -> Result<Vec<WishlistItem>> {
        self.reconciler
            .read(
                "get wishlist",
                ReadPolicy::NetworkFirst,
                Some((&self.wishlists, user_id.as_str())),
                || self.remote.get_wishlist(user_id.as_str()),
                |models| models.into_iter().map(mapper::to_entity).collect(),
            )
            .await
    }

    async fn add_to_wishlist(&self, user_id: &UserId, business: &Business) -> Result<WishlistItem> {
        let model = mapper::to_model(user_id, business);
        let added = self
            .reconciler
            .write("update your wishlist", || self.remote.add_to_wishlist(model))
            .await?;
        best_effort("add to wishlist", self.wishlists.remove(user_id.as_str())).await;
        Ok(mapper::to_entity(added))
    }

    async fn remove_from_wishlist(&self, user_id: &UserId, business_id: &BusinessId) -> Result<()> {
        self.reconciler
            .write("update your wishlist", || {
                self.remote
                    .remove_from_wishlist(user_id.as_str(), business_id.as_str())
            })
            .await?;
        best_effort("remove from wishlist", self.wishlists.remove(user_id.as_str())).await;
        Ok(())
    }

    async fn is_in_wishlist(&self, user_id: &UserId, business_id: &BusinessId) -> Result<bool> {
        self.reconciler
            .read(
                "check wishlist",
                ReadPolicy::NetworkFirst,
                None,
                || self.remote.is_in_wishlist(user_id.as_str(), business_id.as_str()),
                |saved| saved,
            )
            .await
    }
}
