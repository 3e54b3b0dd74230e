//! Business directory repository

use super::FIRST_PAGE;
use crate::domain::business::{Business, BusinessRepository, BusinessUpdate, NewBusiness};
use crate::domain::shared::{BusinessId, Page, PageRequest, Result};
use crate::infrastructure::local::{keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::business as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::business::{BusinessModel, BusinessRemoteDataSource};
use crate::infrastructure::remote::PageQuery;
use async_trait::async_trait;
use std::sync::Arc;

pub struct BusinessRepositoryImpl {
    remote: Arc<dyn BusinessRemoteDataSource>,
    businesses: LocalCache<BusinessModel>,
    /// First listing page, keyed by category
    pages: LocalCache<Vec<BusinessModel>>,
    reconciler: Reconciler,
}

fn page_key(category: Option<&str>) -> String {
    match category {
        Some(category) => format!("{}:{}", FIRST_PAGE, category),
        None => FIRST_PAGE.to_string(),
    }
}

fn to_page(models: Vec<BusinessModel>, page_size: usize) -> Page<Business> {
    let items = models.into_iter().map(mapper::to_entity).collect();
    Page::from_items(items, page_size, |b: &Business| b.id.to_string())
}

impl BusinessRepositoryImpl {
    pub fn new(remote: Arc<dyn BusinessRemoteDataSource>, storage: Arc<dyn KeyValueStore>, reconciler: Reconciler) -> Self {
        Self {
            remote,
            businesses: LocalCache::new(storage.clone(), keys::BUSINESS),
            pages: LocalCache::new(storage, keys::BUSINESS_PAGE),
            reconciler,
        }
    }
}

#[async_trait]
impl BusinessRepository for BusinessRepositoryImpl {
    async fn get_business(&self, id: &BusinessId) -> Result<Business> {
        self.reconciler
            .read(
                "get business",
                ReadPolicy::NetworkFirst,
                Some((&self.businesses, id.as_str())),
                || self.remote.get_business(id.as_str()),
                mapper::to_entity,
            )
            .await
    }

    async fn list_businesses(&self, category: Option<&str>, page: PageRequest) -> Result<Page<Business>> {
        let key = page_key(category);
        let slot = if page.is_first() { Some((&self.pages, key.as_str())) } else { None };
        let page_size = page.page_size;

        self.reconciler
            .read(
                "list businesses",
                ReadPolicy::NetworkFirst,
                slot,
                || {
                    self.remote
                        .list_businesses(category.map(str::to_string), PageQuery::from(&page))
                },
                |models| to_page(models, page_size),
            )
            .await
    }

    async fn search_businesses(&self, term: &str, page: PageRequest) -> Result<Page<Business>> {
        let page_size = page.page_size;
        self.reconciler
            .read(
                "search businesses",
                ReadPolicy::NetworkFirst,
                None,
                || self.remote.search_businesses(term.to_string(), PageQuery::from(&page)),
                |models| to_page(models, page_size),
            )
            .await
    }

    async fn create_business(&self, data: NewBusiness) -> Result<Business> {
        let model = mapper::to_model(data);
        let created = self
            .reconciler
            .write("create a business", || self.remote.create_business(model))
            .await?;
        best_effort("create business", self.businesses.put(&created.id, &created)).await;
        best_effort("create business", self.pages.clear()).await;
        Ok(mapper::to_entity(created))
    }

    async fn update_business(&self, id: &BusinessId, update: BusinessUpdate) -> Result<Business> {
        let changes = mapper::to_changes(update);
        let updated = self
            .reconciler
            .write("update a business", || self.remote.update_business(id.as_str(), changes))
            .await?;
        best_effort("update business", self.businesses.put(&updated.id, &updated)).await;
        Ok(mapper::to_entity(updated))
    }

    async fn delete_business(&self, id: &BusinessId) -> Result<()> {
        self.reconciler
            .write("delete a business", || self.remote.delete_business(id.as_str()))
            .await?;
        best_effort("delete business", self.businesses.remove(id.as_str())).await;
        best_effort("delete business", self.pages.clear()).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{FailureKind, DEFAULT_PAGE_SIZE};
    use crate::infrastructure::error::DataSourceError;
    use crate::infrastructure::local::WireTimestamp;
    use crate::infrastructure::remote::business::MockBusinessRemoteDataSource;
    use crate::infrastructure::repositories::test_support::{harness, server_down};

    fn business(id: &str) -> BusinessModel {
        BusinessModel {
            id: id.to_string(),
            owner_id: Some("owner".to_string()),
            name: format!("Business {}", id),
            name_lower: format!("business {}", id),
            category: "food".to_string(),
            description: String::new(),
            address: "1 Main St".to_string(),
            phone: None,
            image_url: None,
            rating_average: 4.5,
            review_count: 2,
            created_at: WireTimestamp::new(1_700_000_000, 0),
        }
    }

    fn businesses(count: usize) -> Vec<BusinessModel> {
        (0..count).map(|i| business(&format!("b{}", i))).collect()
    }

    fn new_business() -> NewBusiness {
        NewBusiness {
            owner_id: None,
            name: "Cafe".to_string(),
            category: "food".to_string(),
            description: String::new(),
            address: String::new(),
            phone: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_full_page_reports_more() {
        let h = harness(true);
        let mut remote = MockBusinessRemoteDataSource::new();
        remote
            .expect_list_businesses()
            .returning(|_, page| Ok(businesses(if page.cursor.is_none() { 20 } else { 19 })));
        let repo = BusinessRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let first = repo.list_businesses(None, PageRequest::first(DEFAULT_PAGE_SIZE)).await.unwrap();
        assert!(first.has_more);
        assert_eq!(first.items.len(), 20);

        let cursor = first.next_cursor.clone().unwrap();
        let second = repo
            .list_businesses(None, PageRequest::after(cursor, DEFAULT_PAGE_SIZE))
            .await
            .unwrap();
        assert!(!second.has_more);
    }

    #[tokio::test]
    async fn test_first_page_is_served_from_cache_on_network_failure() {
        let h = harness(true);
        let mut remote = MockBusinessRemoteDataSource::new();
        let mut calls = 0;
        remote.expect_list_businesses().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(businesses(3))
            } else {
                Err(DataSourceError::network("timeout"))
            }
        });
        let repo = BusinessRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        repo.list_businesses(Some("food"), PageRequest::default()).await.unwrap();
        let cached = repo.list_businesses(Some("food"), PageRequest::default()).await.unwrap();

        assert_eq!(cached.items.len(), 3);
        assert!(!cached.has_more);
    }

    #[tokio::test]
    async fn test_later_pages_are_not_cached() {
        let h = harness(true);
        let mut remote = MockBusinessRemoteDataSource::new();
        remote.expect_list_businesses().returning(|_, _| Err(server_down()));
        let repo = BusinessRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let failure = repo
            .list_businesses(None, PageRequest::after(crate::domain::shared::Cursor::new("b9"), 20))
            .await
            .unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Server);
        assert!(h.storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_succeeds_even_if_cache_write_fails() {
        let h = harness(true);
        let mut remote = MockBusinessRemoteDataSource::new();
        remote.expect_create_business().times(1).returning(|mut model| {
            model.id = "b1".to_string();
            Ok(model)
        });
        let repo = BusinessRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());
        h.storage.set_fail_writes(true);

        let created = repo.create_business(new_business()).await.unwrap();

        assert_eq!(created.id.as_str(), "b1");
    }

    #[tokio::test]
    async fn test_offline_delete_never_reaches_remote() {
        let h = harness(false);
        let mut remote = MockBusinessRemoteDataSource::new();
        remote.expect_delete_business().never();
        let repo = BusinessRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());

        let failure = repo.delete_business(&BusinessId::new("b1")).await.unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Network);
        assert_eq!(failure.message(), "Cannot delete a business while offline");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_cache_untouched() {
        let h = harness(true);
        let mut remote = MockBusinessRemoteDataSource::new();
        remote.expect_get_business().returning(|_| Ok(business("b1")));
        remote
            .expect_update_business()
            .returning(|_, _| Err(DataSourceError::validation("Name is required")));
        let repo = BusinessRepositoryImpl::new(Arc::new(remote), h.storage.clone(), h.reconciler.clone());
        repo.get_business(&BusinessId::new("b1")).await.unwrap();
        let before = h.storage.raw("@reviewhub/business:b1").await;

        let failure = repo
            .update_business(&BusinessId::new("b1"), BusinessUpdate::default())
            .await
            .unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Validation);
        assert_eq!(h.storage.raw("@reviewhub/business:b1").await, before);
    }
}
