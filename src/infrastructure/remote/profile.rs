//! User profile data source

use super::{collections, to_fields};
use crate::infrastructure::error::DataSourceResult;
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::platform::{
    DocumentStore, FunctionsClient, FN_GET_PROFILE_BY_ID, FN_REGISTER_BUSINESS_OWNER,
    FN_UPDATE_USER_ROLE,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

fn default_role() -> String {
    "simple_user".to_string()
}

/// Profile record in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileModel {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub created_at: WireTimestamp,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Payload of the business owner registration callable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessOwnerRequest {
    pub user_id: String,
    pub business_name: String,
    pub phone: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRemoteDataSource: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> DataSourceResult<ProfileModel>;

    async fn update_profile(&self, user_id: &str, changes: ProfileChanges) -> DataSourceResult<ProfileModel>;

    async fn update_user_role(&self, user_id: &str, role: &str) -> DataSourceResult<()>;

    async fn register_business_owner(&self, request: BusinessOwnerRequest) -> DataSourceResult<ProfileModel>;
}

/// Profile data source; reads and role changes go through callables
pub struct PlatformProfileDataSource {
    store: Arc<dyn DocumentStore>,
    functions: Arc<dyn FunctionsClient>,
}

impl PlatformProfileDataSource {
    pub fn new(store: Arc<dyn DocumentStore>, functions: Arc<dyn FunctionsClient>) -> Self {
        Self { store, functions }
    }
}

#[async_trait]
impl ProfileRemoteDataSource for PlatformProfileDataSource {
    async fn get_profile(&self, user_id: &str) -> DataSourceResult<ProfileModel> {
        let value = self
            .functions
            .call(FN_GET_PROFILE_BY_ID, json!({ "userId": user_id }))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn update_profile(&self, user_id: &str, changes: ProfileChanges) -> DataSourceResult<ProfileModel> {
        let partial = to_fields(&changes)?;
        if !partial.is_empty() {
            self.store.update(collections::USERS, user_id, partial).await?;
        }
        self.get_profile(user_id).await
    }

    async fn update_user_role(&self, user_id: &str, role: &str) -> DataSourceResult<()> {
        self.functions
            .call(FN_UPDATE_USER_ROLE, json!({ "userId": user_id, "role": role }))
            .await?;
        debug!("Role of {} set to {}", user_id, role);
        Ok(())
    }

    async fn register_business_owner(&self, request: BusinessOwnerRequest) -> DataSourceResult<ProfileModel> {
        let value = self
            .functions
            .call(FN_REGISTER_BUSINESS_OWNER, serde_json::to_value(&request)?)
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::error::DataSourceError;
    use crate::infrastructure::platform::{deploy_user_functions, MemoryDocumentStore, MemoryFunctions};

    async fn source() -> PlatformProfileDataSource {
        let store = Arc::new(MemoryDocumentStore::new());
        let profile = json!({ "display_name": "Ada", "role": "simple_user" });
        store
            .set(collections::USERS, "u1", to_fields(&profile).unwrap())
            .await
            .unwrap();
        let functions = Arc::new(MemoryFunctions::new());
        deploy_user_functions(&functions, store.clone()).await;
        PlatformProfileDataSource::new(store, functions)
    }

    #[tokio::test]
    async fn test_missing_fields_are_defaulted() {
        let source = source().await;

        let profile = source.get_profile("u1").await.unwrap();

        assert_eq!(profile.id, "u1");
        assert_eq!(profile.followers_count, 0);
        assert_eq!(profile.created_at, WireTimestamp::default());
    }

    #[tokio::test]
    async fn test_update_profile_merges() {
        let source = source().await;

        let profile = source
            .update_profile(
                "u1",
                ProfileChanges {
                    bio: Some("Analyst".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.display_name, "Ada");
        assert_eq!(profile.bio.as_deref(), Some("Analyst"));
    }

    #[tokio::test]
    async fn test_unknown_profile_is_server_error() {
        let source = source().await;

        let err = source.get_profile("ghost").await.unwrap_err();

        assert!(matches!(err, DataSourceError::Server { .. }));
        assert_eq!(err.code(), Some("not-found"));
    }
}
