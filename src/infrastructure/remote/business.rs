//! Business directory data source

use super::{collections, decode_all, require, to_fields, PageQuery};
use crate::infrastructure::error::DataSourceResult;
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::platform::{Direction, DocumentStore, Query};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Business record in the `businesses` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessModel {
    pub id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub name: String,
    /// Lowercased name, used for prefix search
    #[serde(default)]
    pub name_lower: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating_average: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub created_at: WireTimestamp,
}

/// Partial business update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_lower: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessRemoteDataSource: Send + Sync {
    async fn get_business(&self, id: &str) -> DataSourceResult<BusinessModel>;

    async fn list_businesses(&self, category: Option<String>, page: PageQuery) -> DataSourceResult<Vec<BusinessModel>>;

    /// Businesses whose name starts with `term`, case-insensitively
    async fn search_businesses(&self, term: String, page: PageQuery) -> DataSourceResult<Vec<BusinessModel>>;

    async fn create_business(&self, business: BusinessModel) -> DataSourceResult<BusinessModel>;

    async fn update_business(&self, id: &str, changes: BusinessChanges) -> DataSourceResult<BusinessModel>;

    async fn delete_business(&self, id: &str) -> DataSourceResult<()>;
}

pub struct PlatformBusinessDataSource {
    store: Arc<dyn DocumentStore>,
}

impl PlatformBusinessDataSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BusinessRemoteDataSource for PlatformBusinessDataSource {
    async fn get_business(&self, id: &str) -> DataSourceResult<BusinessModel> {
        let document = self.store.get(collections::BUSINESSES, id).await?;
        require(document, "Business")
    }

    async fn list_businesses(&self, category: Option<String>, page: PageQuery) -> DataSourceResult<Vec<BusinessModel>> {
        let mut query = Query::new();
        if let Some(category) = category {
            query = query.where_eq("category", category);
        }
        let query = page.apply(query.order_by("created_at", Direction::Descending));

        let documents = self.store.query(collections::BUSINESSES, &query).await?;
        decode_all(documents)
    }

    async fn search_businesses(&self, term: String, page: PageQuery) -> DataSourceResult<Vec<BusinessModel>> {
        let prefix = term.trim().to_lowercase();
        let query = page.apply(
            Query::new()
                .starts_with("name_lower", &prefix)
                .order_by("name_lower", Direction::Ascending),
        );

        let documents = self.store.query(collections::BUSINESSES, &query).await?;
        decode_all(documents)
    }

    async fn create_business(&self, mut business: BusinessModel) -> DataSourceResult<BusinessModel> {
        business.name_lower = business.name.to_lowercase();
        let id = self
            .store
            .add(collections::BUSINESSES, to_fields(&business)?)
            .await?;
        debug!("Created business {}", id);
        business.id = id;
        Ok(business)
    }

    async fn update_business(&self, id: &str, mut changes: BusinessChanges) -> DataSourceResult<BusinessModel> {
        changes.name_lower = changes.name.as_ref().map(|name| name.to_lowercase());
        self.store
            .update(collections::BUSINESSES, id, to_fields(&changes)?)
            .await?;
        self.get_business(id).await
    }

    async fn delete_business(&self, id: &str) -> DataSourceResult<()> {
        self.store.delete(collections::BUSINESSES, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::MemoryDocumentStore;

    fn business(name: &str, category: &str, seconds: i64) -> BusinessModel {
        BusinessModel {
            id: String::new(),
            owner_id: None,
            name: name.to_string(),
            name_lower: String::new(),
            category: category.to_string(),
            description: String::new(),
            address: String::new(),
            phone: None,
            image_url: None,
            rating_average: 0.0,
            review_count: 0,
            created_at: WireTimestamp::new(seconds, 0),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_category_newest_first() {
        let source = PlatformBusinessDataSource::new(Arc::new(MemoryDocumentStore::new()));
        source.create_business(business("Cafe Ada", "food", 1)).await.unwrap();
        source.create_business(business("Gym Bob", "sport", 2)).await.unwrap();
        source.create_business(business("Bistro", "food", 3)).await.unwrap();

        let food = source
            .list_businesses(Some("food".to_string()), PageQuery::first(10))
            .await
            .unwrap();

        let names: Vec<_> = food.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Bistro", "Cafe Ada"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_prefix() {
        let source = PlatformBusinessDataSource::new(Arc::new(MemoryDocumentStore::new()));
        source.create_business(business("Cafe Ada", "food", 1)).await.unwrap();
        source.create_business(business("Bistro", "food", 2)).await.unwrap();

        let found = source
            .search_businesses("  CAF".to_string(), PageQuery::first(10))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Cafe Ada");
    }

    #[tokio::test]
    async fn test_rename_keeps_search_key_in_sync() {
        let source = PlatformBusinessDataSource::new(Arc::new(MemoryDocumentStore::new()));
        let created = source.create_business(business("Cafe Ada", "food", 1)).await.unwrap();

        let updated = source
            .update_business(
                &created.id,
                BusinessChanges {
                    name: Some("Zest".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name_lower, "zest");
        assert_eq!(updated.category, "food");
    }
}
