//! View state stores
//!
//! Each store keeps its state behind a `tokio::sync::RwLock` and never holds
//! the lock across a remote call. Identical operations issued concurrently
//! are therefore not merged: each one reaches the remote and the last
//! response to arrive wins.

pub mod feed;
pub mod notifications;
pub mod wishlist;

pub use feed::{FeedState, FeedStore};
pub use notifications::{NotificationState, NotificationStore};
pub use wishlist::{WishlistState, WishlistStore};

#[cfg(test)]
pub(crate) mod mocks {
    use crate::domain::business::Business;
    use crate::domain::feed::{Comment, FeedRepository, NewComment, NewPost, Post};
    use crate::domain::notification::{Notification, NotificationRepository};
    use crate::domain::shared::{BusinessId, NotificationId, Page, PageRequest, PostId, Result, UserId};
    use crate::domain::wishlist::{WishlistItem, WishlistRepository};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Feed {}

        #[async_trait]
        impl FeedRepository for Feed {
            async fn get_feed(&self, viewer: &UserId, page: PageRequest) -> Result<Page<Post>>;
            async fn get_post(&self, id: &PostId, viewer: &UserId) -> Result<Post>;
            async fn create_post(&self, data: NewPost) -> Result<Post>;
            async fn delete_post(&self, id: &PostId) -> Result<()>;
            async fn like_post(&self, id: &PostId, user_id: &UserId) -> Result<()>;
            async fn unlike_post(&self, id: &PostId, user_id: &UserId) -> Result<()>;
            async fn add_comment(&self, data: NewComment) -> Result<Comment>;
            async fn list_comments(&self, post_id: &PostId) -> Result<Vec<Comment>>;
        }
    }

    mock! {
        pub Notifications {}

        #[async_trait]
        impl NotificationRepository for Notifications {
            async fn list_notifications(&self, user_id: &UserId, page: PageRequest) -> Result<Page<Notification>>;
            async fn unread_count(&self, user_id: &UserId) -> Result<usize>;
            async fn mark_as_read(&self, id: &NotificationId) -> Result<()>;
            async fn mark_all_as_read(&self, user_id: &UserId) -> Result<()>;
            async fn delete_notification(&self, id: &NotificationId) -> Result<()>;
        }
    }

    mock! {
        pub Wishlist {}

        #[async_trait]
        impl WishlistRepository for Wishlist {
            async fn get_wishlist(&self, user_id: &UserId) -> Result<Vec<WishlistItem>>;
            async fn add_to_wishlist(&self, user_id: &UserId, business: &Business) -> Result<WishlistItem>;
            async fn remove_from_wishlist(&self, user_id: &UserId, business_id: &BusinessId) -> Result<()>;
            async fn is_in_wishlist(&self, user_id: &UserId, business_id: &BusinessId) -> Result<bool>;
        }
    }
}
