//! Feed entities

use crate::domain::shared::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post in the social feed, as seen by the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub image_url: Option<String>,
    pub likes_count: u32,
    pub is_liked: bool,
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Flip the like flag and adjust the counter accordingly
    pub fn toggle_like(&mut self) {
        if self.is_liked {
            self.is_liked = false;
            self.likes_count = self.likes_count.saturating_sub(1);
        } else {
            self.is_liked = true;
            self.likes_count += 1;
        }
    }
}

/// Post creation data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Comment creation data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(is_liked: bool, likes_count: u32) -> Post {
        Post {
            id: PostId::new("p1"),
            author_id: UserId::new("u1"),
            author_name: "Ada".to_string(),
            content: "hello".to_string(),
            image_url: None,
            likes_count,
            is_liked,
            comments_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_toggle_like() {
        let mut p = post(false, 3);
        p.toggle_like();
        assert!(p.is_liked);
        assert_eq!(p.likes_count, 4);
        p.toggle_like();
        assert!(!p.is_liked);
        assert_eq!(p.likes_count, 3);
    }

    #[test]
    fn test_unlike_never_underflows() {
        let mut p = post(true, 0);
        p.toggle_like();
        assert_eq!(p.likes_count, 0);
    }
}
