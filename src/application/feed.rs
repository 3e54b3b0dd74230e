//! Social feed use cases

use super::macros::use_case;
use crate::domain::feed::{Comment, FeedRepository, NewComment, NewPost, Post};
use crate::domain::shared::{Page, PageRequest, PostId, UserId};

use_case! {
    /// Feed page as seen by `viewer`
    GetFeed(FeedRepository) => get_feed(viewer: &UserId, page: PageRequest) -> Page<Post>;
    GetPost(FeedRepository) => get_post(id: &PostId, viewer: &UserId) -> Post;
    CreatePost(FeedRepository) => create_post(data: NewPost) -> Post;
    DeletePost(FeedRepository) => delete_post(id: &PostId) -> ();
    LikePost(FeedRepository) => like_post(id: &PostId, user_id: &UserId) -> ();
    UnlikePost(FeedRepository) => unlike_post(id: &PostId, user_id: &UserId) -> ();
    AddComment(FeedRepository) => add_comment(data: NewComment) -> Comment;
    ListComments(FeedRepository) => list_comments(post_id: &PostId) -> Vec<Comment>;
}
