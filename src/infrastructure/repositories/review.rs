//! Review repository

use crate::domain::review::{NewReview, Review, ReviewRepository, ReviewUpdate};
use crate::domain::shared::{BusinessId, Page, PageRequest, Result, ReviewId, UserId};
use crate::infrastructure::local::{keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::review as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::review::{ReviewModel, ReviewRemoteDataSource};
use crate::infrastructure::remote::PageQuery;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ReviewRepositoryImpl {
    remote: Arc<dyn ReviewRemoteDataSource>,
    /// Keyed `business:<id>` (first page) or `user:<id>`
    reviews: LocalCache<Vec<ReviewModel>>,
    reconciler: Reconciler,
}

fn business_key(business_id: &str) -> String {
    format!("business:{}", business_id)
}

fn user_key(user_id: &str) -> String {
    format!("user:{}", user_id)
}

impl ReviewRepositoryImpl {
    pub fn new(remote: Arc<dyn ReviewRemoteDataSource>, storage: Arc<dyn KeyValueStore>, reconciler: Reconciler) -> Self {
        Self {
            remote,
            reviews: LocalCache::new(storage, keys::REVIEWS),
            reconciler,
        }
    }

    async fn invalidate(&self, op: &str, review: &ReviewModel) {
        best_effort(op, self.reviews.remove(&business_key(&review.business_id))).await;
        best_effort(op, self.reviews.remove(&user_key(&review.author_id))).await;
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn list_reviews(&self, business_id: &BusinessId, page: PageRequest) -> Result<Page<Review>> {
        let key = business_key(business_id.as_str());
        let slot = if page.is_first() { Some((&self.reviews, key.as_str())) } else { None };
        let page_size = page.page_size;

        self.reconciler
            .read(
                "list reviews",
                ReadPolicy::NetworkFirst,
                slot,
                || self.remote.list_reviews(business_id.as_str(), PageQuery::from(&page)),
                |models| {
                    let items = models.into_iter().map(mapper::to_entity).collect();
                    Page::from_items(items, page_size, |r: &Review| r.id.to_string())
                },
            )
            .await
    }

    async fn list_user_reviews(&self, user_id: &UserId) -> Result<Vec<Review>> {
        let key = user_key(user_id.as_str());
        self.reconciler
            .read(
                "list user reviews",
                ReadPolicy::NetworkFirst,
                Some((&self.reviews, key.as_str())),
                || self.remote.list_user_reviews(user_id.as_str()),
                |models| models.into_iter().map(mapper::to_entity).collect(),
            )
            .await
    }

    async fn create_review(&self, data: NewReview) -> Result<Review> {
        let model = mapper::to_model(data);
        let created = self
            .reconciler
            .write("post a review", || self.remote.create_review(model))
            .await?;
        self.invalidate("create review", &created).await;
        Ok(mapper::to_entity(created))
    }

    async fn update_review(&self, id: &ReviewId, update: ReviewUpdate) -> Result<Review> {
        let changes = mapper::to_changes(update);
        let updated = self
            .reconciler
            .write("edit a review", || self.remote.update_review(id.as_str(), changes))
            .await?;
        self.invalidate("update review", &updated).await;
        Ok(mapper::to_entity(updated))
    }

    async fn delete_review(&self, id: &ReviewId) -> Result<()> {
        let deleted = self
            .reconciler
            .write("delete a review", || self.remote.delete_review(id.as_str()))
            .await?;
        self.invalidate("delete review", &deleted).await;
        Ok(())
    }
}
