//! Feed repository interface

use super::entity::{Comment, NewComment, NewPost, Post};
use crate::domain::shared::{Page, PageRequest, PostId, Result, UserId};
use async_trait::async_trait;

/// Feed repository trait
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Newest posts first, with `is_liked` resolved for `viewer`
    async fn get_feed(&self, viewer: &UserId, page: PageRequest) -> Result<Page<Post>>;

    async fn get_post(&self, id: &PostId, viewer: &UserId) -> Result<Post>;

    async fn create_post(&self, data: NewPost) -> Result<Post>;

    async fn delete_post(&self, id: &PostId) -> Result<()>;

    async fn like_post(&self, id: &PostId, user_id: &UserId) -> Result<()>;

    async fn unlike_post(&self, id: &PostId, user_id: &UserId) -> Result<()>;

    async fn add_comment(&self, data: NewComment) -> Result<Comment>;

    async fn list_comments(&self, post_id: &PostId) -> Result<Vec<Comment>>;
}
