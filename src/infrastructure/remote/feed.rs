//! Social feed data source

use super::{collections, decode_all, require, to_fields, PageQuery};
use crate::infrastructure::error::DataSourceResult;
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::platform::{Direction, DocumentStore, Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Post record in the `posts` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostModel {
    pub id: String,
    pub author_id: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub likes_count: u32,
    /// Ids of the users who liked the post
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub created_at: WireTimestamp,
}

/// Comment record in the `comments` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentModel {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: WireTimestamp,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedRemoteDataSource: Send + Sync {
    async fn get_feed(&self, page: PageQuery) -> DataSourceResult<Vec<PostModel>>;

    async fn get_post(&self, id: &str) -> DataSourceResult<PostModel>;

    async fn create_post(&self, post: PostModel) -> DataSourceResult<PostModel>;

    async fn delete_post(&self, id: &str) -> DataSourceResult<()>;

    async fn like_post(&self, post_id: &str, user_id: &str) -> DataSourceResult<()>;

    async fn unlike_post(&self, post_id: &str, user_id: &str) -> DataSourceResult<()>;

    async fn add_comment(&self, comment: CommentModel) -> DataSourceResult<CommentModel>;

    /// Comments of a post, oldest first
    async fn list_comments(&self, post_id: &str) -> DataSourceResult<Vec<CommentModel>>;
}

pub struct PlatformFeedDataSource {
    store: Arc<dyn DocumentStore>,
}

impl PlatformFeedDataSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FeedRemoteDataSource for PlatformFeedDataSource {
    async fn get_feed(&self, page: PageQuery) -> DataSourceResult<Vec<PostModel>> {
        let query = page.apply(Query::new().order_by("created_at", Direction::Descending));
        decode_all(self.store.query(collections::POSTS, &query).await?)
    }

    async fn get_post(&self, id: &str) -> DataSourceResult<PostModel> {
        let document = self.store.get(collections::POSTS, id).await?;
        require(document, "Post")
    }

    async fn create_post(&self, mut post: PostModel) -> DataSourceResult<PostModel> {
        post.id = self.store.add(collections::POSTS, to_fields(&post)?).await?;
        debug!("Created post {}", post.id);
        Ok(post)
    }

    async fn delete_post(&self, id: &str) -> DataSourceResult<()> {
        self.store.delete(collections::POSTS, id).await?;
        Ok(())
    }

    async fn like_post(&self, post_id: &str, user_id: &str) -> DataSourceResult<()> {
        let post = self.get_post(post_id).await?;
        if post.liked_by.iter().any(|id| id == user_id) {
            return Ok(());
        }
        self.store
            .array_union(collections::POSTS, post_id, "liked_by", json!(user_id))
            .await?;
        self.store.increment(collections::POSTS, post_id, "likes_count", 1).await?;
        Ok(())
    }

    async fn unlike_post(&self, post_id: &str, user_id: &str) -> DataSourceResult<()> {
        let post = self.get_post(post_id).await?;
        if !post.liked_by.iter().any(|id| id == user_id) {
            return Ok(());
        }
        self.store
            .array_remove(collections::POSTS, post_id, "liked_by", json!(user_id))
            .await?;
        self.store.increment(collections::POSTS, post_id, "likes_count", -1).await?;
        Ok(())
    }

    async fn add_comment(&self, mut comment: CommentModel) -> DataSourceResult<CommentModel> {
        comment.id = self.store.add(collections::COMMENTS, to_fields(&comment)?).await?;
        self.store
            .increment(collections::POSTS, &comment.post_id, "comments_count", 1)
            .await?;
        Ok(comment)
    }

    async fn list_comments(&self, post_id: &str) -> DataSourceResult<Vec<CommentModel>> {
        let query = Query::new()
            .where_eq("post_id", post_id)
            .order_by("created_at", Direction::Ascending);
        decode_all(self.store.query(collections::COMMENTS, &query).await?)
    }
}
