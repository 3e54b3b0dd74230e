use crate::domain::review::{NewReview, Review, ReviewUpdate};
use crate::domain::shared::{BusinessId, ReviewId, UserId};
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::remote::review::{ReviewChanges, ReviewModel};

pub fn to_entity(model: ReviewModel) -> Review {
    Review {
        id: ReviewId::new(model.id),
        business_id: BusinessId::new(model.business_id),
        author_id: UserId::new(model.author_id),
        author_name: model.author_name,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at.to_datetime(),
        updated_at: model.updated_at.map(WireTimestamp::to_datetime),
    }
}

pub fn to_model(data: NewReview) -> ReviewModel {
    ReviewModel {
        id: String::new(),
        business_id: data.business_id.into_inner(),
        author_id: data.author_id.into_inner(),
        author_name: data.author_name,
        rating: data.rating,
        comment: data.comment,
        created_at: WireTimestamp::now(),
        updated_at: None,
    }
}

pub fn to_changes(update: ReviewUpdate) -> ReviewChanges {
    ReviewChanges {
        rating: update.rating,
        comment: update.comment,
        updated_at: None,
    }
}
