//! Wishlist state

use crate::application::wishlist::{GetWishlist, RemoveFromWishlist};
use crate::domain::shared::{BusinessId, Result, UserId};
use crate::domain::wishlist::{WishlistItem, WishlistRepository};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistState {
    pub items: Vec<WishlistItem>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct WishlistStore {
    state: Arc<RwLock<WishlistState>>,
    get_wishlist: GetWishlist,
    remove_from_wishlist: RemoveFromWishlist,
}

impl WishlistStore {
    pub fn new(repository: Arc<dyn WishlistRepository>) -> Self {
        Self {
            state: Arc::new(RwLock::new(WishlistState::default())),
            get_wishlist: GetWishlist::new(repository.clone()),
            remove_from_wishlist: RemoveFromWishlist::new(repository),
        }
    }

    pub async fn snapshot(&self) -> WishlistState {
        self.state.read().await.clone()
    }

    pub async fn reset(&self) {
        *self.state.write().await = WishlistState::default();
    }

    pub async fn load(&self, user_id: &UserId) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.get_wishlist.execute(user_id).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(items) => {
                state.items = items;
                Ok(())
            }
            Err(failure) => {
                state.error = Some(failure.message().to_string());
                Err(failure)
            }
        }
    }

    /// Drop the item from the list at once; the previous list comes back
    /// if the remote refuses
    pub async fn remove(&self, user_id: &UserId, business_id: &BusinessId) -> Result<()> {
        let previous = {
            let mut state = self.state.write().await;
            let previous = state.items.clone();
            state.items.retain(|item| &item.business_id != business_id);
            previous
        };

        if let Err(failure) = self.remove_from_wishlist.execute(user_id, business_id).await {
            warn!("Removing {} from wishlist failed, rolling back: {}", business_id, failure);
            let mut state = self.state.write().await;
            state.items = previous;
            state.error = Some(failure.message().to_string());
            return Err(failure);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Failure;
    use crate::interface::state::mocks::MockWishlist;
    use chrono::Utc;

    fn item(business_id: &str) -> WishlistItem {
        WishlistItem {
            business_id: BusinessId::new(business_id),
            business_name: format!("Cafe {}", business_id),
            category: "food".to_string(),
            image_url: None,
            added_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_failed_remove_restores_list() {
        let mut repository = MockWishlist::new();
        repository
            .expect_get_wishlist()
            .returning(|_| Ok(vec![item("b1"), item("b2")]));
        repository
            .expect_remove_from_wishlist()
            .times(1)
            .returning(|_, _| Err(Failure::network("Cannot remove from wishlist while offline")));
        let store = WishlistStore::new(Arc::new(repository));
        let user = UserId::new("u1");
        store.load(&user).await.unwrap();
        let before = store.snapshot().await.items;

        assert!(store.remove(&user, &BusinessId::new("b1")).await.is_err());

        let after = store.snapshot().await;
        assert_eq!(after.items, before);
        assert!(after.error.is_some());
    }

    #[tokio::test]
    async fn test_remove_keeps_other_items() {
        let mut repository = MockWishlist::new();
        repository
            .expect_get_wishlist()
            .returning(|_| Ok(vec![item("b1"), item("b2")]));
        repository.expect_remove_from_wishlist().times(1).returning(|_, _| Ok(()));
        let store = WishlistStore::new(Arc::new(repository));
        let user = UserId::new("u1");
        store.load(&user).await.unwrap();

        store.remove(&user, &BusinessId::new("b1")).await.unwrap();

        let items = store.snapshot().await.items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].business_id, BusinessId::new("b2"));
    }
}
