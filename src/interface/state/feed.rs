//! Feed screen state

use crate::application::feed::{GetFeed, LikePost, UnlikePost};
use crate::domain::feed::{FeedRepository, Post};
use crate::domain::shared::{Cursor, Failure, PageRequest, PostId, Result, UserId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    pub posts: Vec<Post>,
    pub next_cursor: Option<Cursor>,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Paginated feed with optimistic likes
pub struct FeedStore {
    state: Arc<RwLock<FeedState>>,
    get_feed: GetFeed,
    like_post: LikePost,
    unlike_post: UnlikePost,
    page_size: usize,
}

impl FeedStore {
    pub fn new(repository: Arc<dyn FeedRepository>, page_size: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(FeedState::default())),
            get_feed: GetFeed::new(repository.clone()),
            like_post: LikePost::new(repository.clone()),
            unlike_post: UnlikePost::new(repository),
            page_size,
        }
    }

    pub async fn snapshot(&self) -> FeedState {
        self.state.read().await.clone()
    }

    pub async fn reset(&self) {
        *self.state.write().await = FeedState::default();
    }

    /// Replace the loaded posts with the first page
    pub async fn load_first_page(&self, viewer: &UserId) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self
            .get_feed
            .execute(viewer, PageRequest::first(self.page_size))
            .await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(page) => {
                state.posts = page.items;
                state.next_cursor = page.next_cursor;
                state.has_more = page.has_more;
                Ok(())
            }
            Err(failure) => {
                state.error = Some(failure.message().to_string());
                Err(failure)
            }
        }
    }

    /// Append the next page; does nothing when no more pages are expected
    /// or a load is already running
    pub async fn load_next_page(&self, viewer: &UserId) -> Result<()> {
        let cursor = {
            let mut state = self.state.write().await;
            if !state.has_more || state.loading {
                return Ok(());
            }
            let Some(cursor) = state.next_cursor.clone() else {
                return Ok(());
            };
            state.loading = true;
            state.error = None;
            cursor
        };

        let result = self
            .get_feed
            .execute(viewer, PageRequest::after(cursor, self.page_size))
            .await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(page) => {
                debug!("Appending {} posts", page.items.len());
                state.posts.extend(page.items);
                if page.next_cursor.is_some() {
                    state.next_cursor = page.next_cursor;
                }
                state.has_more = page.has_more;
                Ok(())
            }
            Err(failure) => {
                state.error = Some(failure.message().to_string());
                Err(failure)
            }
        }
    }

    /// Flip the like on a loaded post, then confirm with the remote.
    ///
    /// On failure only that post is restored to its previous value.
    pub async fn toggle_like(&self, post_id: &PostId, user_id: &UserId) -> Result<()> {
        let previous = {
            let mut state = self.state.write().await;
            let Some(post) = state.posts.iter_mut().find(|p| &p.id == post_id) else {
                return Err(Failure::validation(format!("Post {} is not loaded", post_id)));
            };
            let previous = post.clone();
            post.toggle_like();
            previous
        };

        let result = if previous.is_liked {
            self.unlike_post.execute(post_id, user_id).await
        } else {
            self.like_post.execute(post_id, user_id).await
        };

        if let Err(failure) = result {
            warn!("Like toggle on {} failed, rolling back: {}", post_id, failure);
            let mut state = self.state.write().await;
            if let Some(post) = state.posts.iter_mut().find(|p| &p.id == post_id) {
                *post = previous;
            }
            state.error = Some(failure.message().to_string());
            return Err(failure);
        }
        Ok(())
    }
}
