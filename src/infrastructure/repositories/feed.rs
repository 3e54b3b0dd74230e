//! Social feed repository

use super::FIRST_PAGE;
use crate::domain::feed::{Comment, FeedRepository, NewComment, NewPost, Post};
use crate::domain::shared::{Page, PageRequest, PostId, Result, UserId};
use crate::infrastructure::local::{keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::feed as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::feed::{CommentModel, FeedRemoteDataSource, PostModel};
use crate::infrastructure::remote::PageQuery;
use async_trait::async_trait;
use std::sync::Arc;

pub struct FeedRepositoryImpl {
    remote: Arc<dyn FeedRemoteDataSource>,
    /// Keyed `first` for the feed's first page
    pages: LocalCache<Vec<PostModel>>,
    posts: LocalCache<PostModel>,
    /// Keyed by post id
    comments: LocalCache<Vec<CommentModel>>,
    reconciler: Reconciler,
}

impl FeedRepositoryImpl {
    pub fn new(remote: Arc<dyn FeedRemoteDataSource>, storage: Arc<dyn KeyValueStore>, reconciler: Reconciler) -> Self {
        Self {
            remote,
            pages: LocalCache::new(storage.clone(), keys::FEED),
            posts: LocalCache::new(storage.clone(), format!("{}/post", keys::FEED)),
            comments: LocalCache::new(storage, format!("{}/comments", keys::FEED)),
            reconciler,
        }
    }
}

#[async_trait]
impl FeedRepository for FeedRepositoryImpl {
    async fn get_feed(&self, viewer: &UserId, page: PageRequest) -> Result<Page<Post>> {
        let slot = if page.is_first() { Some((&self.pages, FIRST_PAGE)) } else { None };
        let page_size = page.page_size;

        self.reconciler
            .read(
                "get feed",
                ReadPolicy::NetworkFirst,
                slot,
                || self.remote.get_feed(PageQuery::from(&page)),
                |models| {
                    let items = models.into_iter().map(|m| mapper::to_entity(m, viewer)).collect();
                    Page::from_items(items, page_size, |p: &Post| p.id.to_string())
                },
            )
            .await
    }

    async fn get_post(&self, id: &PostId, viewer: &UserId) -> Result<Post> {
        self.reconciler
            .read(
                "get post",
                ReadPolicy::NetworkFirst,
                Some((&self.posts, id.as_str())),
                || self.remote.get_post(id.as_str()),
                |model| mapper::to_entity(model, viewer),
            )
            .await
    }

    async fn create_post(&self, data: NewPost) -> Result<Post> {
        let author = data.author_id.clone();
        let model = mapper::to_model(data);
        let created = self
            .reconciler
            .write("publish a post", || self.remote.create_post(model))
            .await?;
        best_effort("create post", self.pages.remove(FIRST_PAGE)).await;
        Ok(mapper::to_entity(created, &author))
    }

    async fn delete_post(&self, id: &PostId) -> Result<()> {
        self.reconciler
            .write("delete a post", || self.remote.delete_post(id.as_str()))
            .await?;
        best_effort("delete post", self.posts.remove(id.as_str())).await;
        best_effort("delete post", self.pages.remove(FIRST_PAGE)).await;
        Ok(())
    }

    async fn like_post(&self, id: &PostId, user_id: &UserId) -> Result<()> {
        self.reconciler
            .write("like posts", || self.remote.like_post(id.as_str(), user_id.as_str()))
            .await
    }

    async fn unlike_post(&self, id: &PostId, user_id: &UserId) -> Result<()> {
        self.reconciler
            .write("unlike posts", || self.remote.unlike_post(id.as_str(), user_id.as_str()))
            .await
    }

    async fn add_comment(&self, data: NewComment) -> Result<Comment> {
        let model = mapper::comment_to_model(data);
        let created = self
            .reconciler
            .write("comment", || self.remote.add_comment(model))
            .await?;
        best_effort("add comment", self.comments.remove(&created.post_id)).await;
        Ok(mapper::comment_to_entity(created))
    }

    async fn list_comments(&self, post_id: &PostId) -> Result<Vec<Comment>> {
        self.reconciler
            .read(
                "list comments",
                ReadPolicy::NetworkFirst,
                Some((&self.comments, post_id.as_str())),
                || self.remote.list_comments(post_id.as_str()),
                |models| models.into_iter().map(mapper::comment_to_entity).collect(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::FailureKind;
    use crate::infrastructure::local::WireTimestamp;
    use crate::infrastructure::remote::feed::MockFeedRemoteDataSource;
    use crate::infrastructure::repositories::test_support::{harness, server_down};

    fn post(id: &str, liked_by: &[&str]) -> PostModel {
        PostModel {
            id: id.to_string(),
            author_id: "u1".to_string(),
            author_name: "Ada".to_string(),
            content: "hello".to_string(),
            image_url: None,
            likes_count: liked_by.len() as u32,
            liked_by: liked_by.iter().map(|s| s.to_string()).collect(),
            comments_count: 0,
            created_at: WireTimestamp::new(1_700_000_000, 0),
        }
    }

    #[tokio::test]
    async fn test_cached_feed_is_personalised_per_viewer() {
        let h = harness(true);
        let mut remote = MockFeedRemoteDataSource::new();
        let mut calls = 0;
        remote.expect_get_feed().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(vec![post("p1", &["u2"])])
            } else {
                Err(server_down())
            }
        });
        let repo = FeedRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let as_liker = repo.get_feed(&UserId::new("u2"), PageRequest::default()).await.unwrap();
        let as_other = repo.get_feed(&UserId::new("u3"), PageRequest::default()).await.unwrap();

        assert!(as_liker.items[0].is_liked);
        assert!(!as_other.items[0].is_liked);
        assert_eq!(as_other.items[0].likes_count, 1);
    }

    #[tokio::test]
    async fn test_offline_feed_uses_cache_without_remote() {
        let h = harness(true);
        let mut remote = MockFeedRemoteDataSource::new();
        remote.expect_get_feed().times(1).returning(|_| Ok(vec![post("p1", &[])]));
        let repo = FeedRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());
        let viewer = UserId::new("u1");
        repo.get_feed(&viewer, PageRequest::default()).await.unwrap();

        h.probe.set_online(false);
        let cached = repo.get_feed(&viewer, PageRequest::default()).await.unwrap();

        assert_eq!(cached.items.len(), 1);
        assert!(!cached.has_more);
    }

    #[tokio::test]
    async fn test_offline_like_never_reaches_remote() {
        let h = harness(false);
        let mut remote = MockFeedRemoteDataSource::new();
        remote.expect_like_post().never();
        let repo = FeedRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let failure = repo
            .like_post(&PostId::new("p1"), &UserId::new("u2"))
            .await
            .unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Network);
    }
}
