use crate::domain::feed::{Comment, NewComment, NewPost, Post};
use crate::domain::shared::{CommentId, PostId, UserId};
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::remote::feed::{CommentModel, PostModel};

/// Post as seen by `viewer`
pub fn to_entity(model: PostModel, viewer: &UserId) -> Post {
    let is_liked = model.liked_by.iter().any(|id| id == viewer.as_str());
    Post {
        id: PostId::new(model.id),
        author_id: UserId::new(model.author_id),
        author_name: model.author_name,
        content: model.content,
        image_url: model.image_url,
        likes_count: model.likes_count,
        is_liked,
        comments_count: model.comments_count,
        created_at: model.created_at.to_datetime(),
    }
}

pub fn to_model(data: NewPost) -> PostModel {
    PostModel {
        id: String::new(),
        author_id: data.author_id.into_inner(),
        author_name: data.author_name,
        content: data.content,
        image_url: data.image_url,
        likes_count: 0,
        liked_by: Vec::new(),
        comments_count: 0,
        created_at: WireTimestamp::now(),
    }
}

pub fn comment_to_entity(model: CommentModel) -> Comment {
    Comment {
        id: CommentId::new(model.id),
        post_id: PostId::new(model.post_id),
        author_id: UserId::new(model.author_id),
        author_name: model.author_name,
        text: model.text,
        created_at: model.created_at.to_datetime(),
    }
}

pub fn comment_to_model(data: NewComment) -> CommentModel {
    CommentModel {
        id: String::new(),
        post_id: data.post_id.into_inner(),
        author_id: data.author_id.into_inner(),
        author_name: data.author_name,
        text: data.text,
        created_at: WireTimestamp::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_liked_depends_on_viewer() {
        let model = PostModel {
            id: "p1".to_string(),
            author_id: "u1".to_string(),
            author_name: "Ada".to_string(),
            content: "hi".to_string(),
            image_url: None,
            likes_count: 1,
            liked_by: vec!["u2".to_string()],
            comments_count: 0,
            created_at: WireTimestamp::default(),
        };

        assert!(to_entity(model.clone(), &UserId::new("u2")).is_liked);
        assert!(!to_entity(model, &UserId::new("u3")).is_liked);
    }
}
