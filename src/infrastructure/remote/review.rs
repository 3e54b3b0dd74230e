//! Review data source
//!
//! Review writes also refresh the reviewed business's `rating_average` and
//! `review_count`.

use super::{collections, decode_all, require, to_fields, PageQuery};
use crate::domain::review::is_valid_rating;
use crate::infrastructure::error::{DataSourceError, DataSourceResult};
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::platform::{Direction, DocumentStore, Fields, Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub const INVALID_RATING: &str = "Rating must be between 1 and 5";

/// Review record in the `reviews` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewModel {
    pub id: String,
    pub business_id: String,
    pub author_id: String,
    #[serde(default)]
    pub author_name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: WireTimestamp,
    #[serde(default)]
    pub updated_at: Option<WireTimestamp>,
}

/// Partial review update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<WireTimestamp>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRemoteDataSource: Send + Sync {
    async fn list_reviews(&self, business_id: &str, page: PageQuery) -> DataSourceResult<Vec<ReviewModel>>;

    async fn list_user_reviews(&self, user_id: &str) -> DataSourceResult<Vec<ReviewModel>>;

    async fn create_review(&self, review: ReviewModel) -> DataSourceResult<ReviewModel>;

    async fn update_review(&self, id: &str, changes: ReviewChanges) -> DataSourceResult<ReviewModel>;

    /// Returns the removed review so callers know which lists it was on
    async fn delete_review(&self, id: &str) -> DataSourceResult<ReviewModel>;
}

pub struct PlatformReviewDataSource {
    store: Arc<dyn DocumentStore>,
}

impl PlatformReviewDataSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn get_review(&self, id: &str) -> DataSourceResult<ReviewModel> {
        let document = self.store.get(collections::REVIEWS, id).await?;
        require(document, "Review")
    }

    async fn refresh_business_rating(&self, business_id: &str) -> DataSourceResult<()> {
        let query = Query::new().where_eq("business_id", business_id);
        let reviews: Vec<ReviewModel> = decode_all(self.store.query(collections::REVIEWS, &query).await?)?;

        let count = reviews.len();
        let average = if count == 0 {
            0.0
        } else {
            reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / count as f64
        };

        let mut partial = Fields::new();
        partial.insert("rating_average".to_string(), json!(average));
        partial.insert("review_count".to_string(), json!(count));
        self.store.update(collections::BUSINESSES, business_id, partial).await?;

        debug!("Business {} now rated {:.2} over {} reviews", business_id, average, count);
        Ok(())
    }
}

fn check_rating(rating: u8) -> DataSourceResult<()> {
    if is_valid_rating(rating) {
        Ok(())
    } else {
        Err(DataSourceError::validation(INVALID_RATING))
    }
}

#[async_trait]
impl ReviewRemoteDataSource for PlatformReviewDataSource {
    async fn list_reviews(&self, business_id: &str, page: PageQuery) -> DataSourceResult<Vec<ReviewModel>> {
        let query = page.apply(
            Query::new()
                .where_eq("business_id", business_id)
                .order_by("created_at", Direction::Descending),
        );
        decode_all(self.store.query(collections::REVIEWS, &query).await?)
    }

    async fn list_user_reviews(&self, user_id: &str) -> DataSourceResult<Vec<ReviewModel>> {
        let query = Query::new()
            .where_eq("author_id", user_id)
            .order_by("created_at", Direction::Descending);
        decode_all(self.store.query(collections::REVIEWS, &query).await?)
    }

    async fn create_review(&self, mut review: ReviewModel) -> DataSourceResult<ReviewModel> {
        check_rating(review.rating)?;

        review.id = self.store.add(collections::REVIEWS, to_fields(&review)?).await?;
        self.refresh_business_rating(&review.business_id).await?;
        Ok(review)
    }

    async fn update_review(&self, id: &str, mut changes: ReviewChanges) -> DataSourceResult<ReviewModel> {
        if let Some(rating) = changes.rating {
            check_rating(rating)?;
        }
        changes.updated_at = Some(WireTimestamp::now());

        self.store.update(collections::REVIEWS, id, to_fields(&changes)?).await?;
        let review = self.get_review(id).await?;
        if changes.rating.is_some() {
            self.refresh_business_rating(&review.business_id).await?;
        }
        Ok(review)
    }

    async fn delete_review(&self, id: &str) -> DataSourceResult<ReviewModel> {
        let review = self.get_review(id).await?;
        self.store.delete(collections::REVIEWS, id).await?;
        self.refresh_business_rating(&review.business_id).await?;
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::MemoryDocumentStore;

    async fn setup() -> (PlatformReviewDataSource, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .set(collections::BUSINESSES, "b1", to_fields(&json!({ "name": "Cafe" })).unwrap())
            .await
            .unwrap();
        (PlatformReviewDataSource::new(store.clone()), store)
    }

    fn review(rating: u8) -> ReviewModel {
        ReviewModel {
            id: String::new(),
            business_id: "b1".to_string(),
            author_id: "u1".to_string(),
            author_name: "Ada".to_string(),
            rating,
            comment: "Nice".to_string(),
            created_at: WireTimestamp::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected_before_writing() {
        let (source, store) = setup().await;

        let err = source.create_review(review(6)).await.unwrap_err();

        assert!(matches!(err, DataSourceError::Validation { .. }));
        assert_eq!(store.len(collections::REVIEWS).await, 0);
    }

    #[tokio::test]
    async fn test_business_aggregates_follow_reviews() {
        let (source, store) = setup().await;

        let first = source.create_review(review(5)).await.unwrap();
        source.create_review(review(2)).await.unwrap();

        let business = store.get(collections::BUSINESSES, "b1").await.unwrap().unwrap();
        assert_eq!(business.data["review_count"], 2);
        assert_eq!(business.data["rating_average"], 3.5);

        let deleted = source.delete_review(&first.id).await.unwrap();
        assert_eq!(deleted.rating, 5);
        let business = store.get(collections::BUSINESSES, "b1").await.unwrap().unwrap();
        assert_eq!(business.data["review_count"], 1);
        assert_eq!(business.data["rating_average"], 2.0);
    }

    #[tokio::test]
    async fn test_update_stamps_updated_at() {
        let (source, _) = setup().await;
        let created = source.create_review(review(4)).await.unwrap();

        let updated = source
            .update_review(
                &created.id,
                ReviewChanges {
                    comment: Some("Even better".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.comment, "Even better");
        assert!(updated.updated_at.is_some());
    }
}
