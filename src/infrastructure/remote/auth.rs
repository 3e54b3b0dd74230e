//! Authentication data source

use super::{collections, to_fields};
use crate::infrastructure::error::DataSourceResult;
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::platform::{AuthProvider, AuthRecord, DocumentStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Signed-in account as returned by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUserModel {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

impl From<AuthRecord> for AuthUserModel {
    fn from(record: AuthRecord) -> Self {
        Self {
            uid: record.uid,
            email: record.email,
            display_name: record.display_name,
            email_verified: record.email_verified,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRemoteDataSource: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> DataSourceResult<AuthUserModel>;

    /// Create the account and its profile document
    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> DataSourceResult<AuthUserModel>;

    async fn sign_out(&self) -> DataSourceResult<()>;

    async fn current_user(&self) -> DataSourceResult<Option<AuthUserModel>>;

    async fn send_password_reset(&self, email: &str) -> DataSourceResult<()>;

    async fn change_email(&self, current_password: &str, new_email: &str) -> DataSourceResult<AuthUserModel>;

    async fn change_password(&self, current_password: &str, new_password: &str) -> DataSourceResult<()>;
}

/// Auth data source over the platform auth provider
pub struct PlatformAuthDataSource {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
}

impl PlatformAuthDataSource {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { auth, store }
    }
}

#[async_trait]
impl AuthRemoteDataSource for PlatformAuthDataSource {
    async fn sign_in(&self, email: &str, password: &str) -> DataSourceResult<AuthUserModel> {
        let record = self.auth.sign_in(email, password).await?;
        debug!("Signed in {}", record.uid);
        Ok(record.into())
    }

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> DataSourceResult<AuthUserModel> {
        let record = self.auth.create_user(email, password, display_name).await?;

        let profile = json!({
            "display_name": display_name,
            "email": email,
            "role": "simple_user",
            "followers_count": 0,
            "following_count": 0,
            "created_at": WireTimestamp::now(),
        });
        self.store
            .set(collections::USERS, &record.uid, to_fields(&profile)?)
            .await?;

        debug!("Created account {}", record.uid);
        Ok(record.into())
    }

    async fn sign_out(&self) -> DataSourceResult<()> {
        self.auth.sign_out().await?;
        Ok(())
    }

    async fn current_user(&self) -> DataSourceResult<Option<AuthUserModel>> {
        Ok(self.auth.current_user().await?.map(AuthUserModel::from))
    }

    async fn send_password_reset(&self, email: &str) -> DataSourceResult<()> {
        self.auth.send_password_reset(email).await?;
        Ok(())
    }

    async fn change_email(&self, current_password: &str, new_email: &str) -> DataSourceResult<AuthUserModel> {
        let record = self.auth.update_email(current_password, new_email).await?;

        let mut partial = serde_json::Map::new();
        partial.insert("email".to_string(), json!(new_email));
        self.store.update(collections::USERS, &record.uid, partial).await?;

        Ok(record.into())
    }

    async fn change_password(&self, current_password: &str, new_password: &str) -> DataSourceResult<()> {
        self.auth.update_password(current_password, new_password).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::error::DataSourceError;
    use crate::infrastructure::platform::memory::{MemoryAuthProvider, MemoryDocumentStore};

    fn source() -> (PlatformAuthDataSource, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let source = PlatformAuthDataSource::new(Arc::new(MemoryAuthProvider::new()), store.clone());
        (source, store)
    }

    #[tokio::test]
    async fn test_sign_up_creates_profile_document() {
        let (source, store) = source();

        let user = source.sign_up("ada@example.com", "secret1", "Ada").await.unwrap();

        let profile = store.get(collections::USERS, &user.uid).await.unwrap().unwrap();
        assert_eq!(profile.data["display_name"], "Ada");
        assert_eq!(profile.data["role"], "simple_user");
    }

    #[tokio::test]
    async fn test_wrong_password_is_auth_error() {
        let (source, _) = source();
        source.sign_up("ada@example.com", "secret1", "Ada").await.unwrap();

        let err = source.sign_in("ada@example.com", "nope").await.unwrap_err();

        assert!(matches!(err, DataSourceError::Auth { .. }));
        assert_eq!(err.code(), Some("auth/wrong-password"));
    }

    #[tokio::test]
    async fn test_change_email_updates_profile() {
        let (source, store) = source();
        let user = source.sign_up("ada@example.com", "secret1", "Ada").await.unwrap();

        let changed = source.change_email("secret1", "ada@lovelace.dev").await.unwrap();

        assert_eq!(changed.email, "ada@lovelace.dev");
        let profile = store.get(collections::USERS, &user.uid).await.unwrap().unwrap();
        assert_eq!(profile.data["email"], "ada@lovelace.dev");
    }
}
