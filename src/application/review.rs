//! Review use cases

use super::macros::use_case;
use crate::domain::review::{NewReview, Review, ReviewRepository, ReviewUpdate};
use crate::domain::shared::{BusinessId, Page, PageRequest, ReviewId, UserId};

use_case! {
    ListReviews(ReviewRepository) => list_reviews(business_id: &BusinessId, page: PageRequest) -> Page<Review>;
    ListUserReviews(ReviewRepository) => list_user_reviews(user_id: &UserId) -> Vec<Review>;
    CreateReview(ReviewRepository) => create_review(data: NewReview) -> Review;
    UpdateReview(ReviewRepository) => update_review(id: &ReviewId, update: ReviewUpdate) -> Review;
    DeleteReview(ReviewRepository) => delete_review(id: &ReviewId) -> ();
}
