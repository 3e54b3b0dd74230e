//! User settings and feature flag data source

use super::{collections, decode, to_fields};
use crate::infrastructure::error::DataSourceResult;
use crate::infrastructure::platform::{DocumentStore, RemoteConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "system".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Settings record in the `settings` collection, keyed by user id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsModel {
    #[serde(default = "default_true")]
    pub push_notifications: bool,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub private_profile: bool,
}

impl Default for SettingsModel {
    fn default() -> Self {
        Self {
            push_notifications: true,
            email_notifications: false,
            theme: default_theme(),
            language: default_language(),
            private_profile: false,
        }
    }
}

/// Flag name to enabled
pub type FeatureFlagsModel = BTreeMap<String, bool>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRemoteDataSource: Send + Sync {
    /// Stored settings, or the defaults when the user never saved any
    async fn get_settings(&self, user_id: &str) -> DataSourceResult<SettingsModel>;

    /// Replace the stored settings
    async fn save_settings(&self, user_id: &str, settings: SettingsModel) -> DataSourceResult<SettingsModel>;

    async fn get_feature_flags(&self) -> DataSourceResult<FeatureFlagsModel>;
}

pub struct PlatformSettingsDataSource {
    store: Arc<dyn DocumentStore>,
    remote_config: Arc<dyn RemoteConfig>,
}

impl PlatformSettingsDataSource {
    pub fn new(store: Arc<dyn DocumentStore>, remote_config: Arc<dyn RemoteConfig>) -> Self {
        Self { store, remote_config }
    }
}

fn flag_value(name: &str, value: &Value) -> Option<bool> {
    match value {
        Value::Bool(enabled) => Some(*enabled),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        other => {
            warn!("Ignoring non-boolean feature flag {} = {}", name, other);
            None
        }
    }
}

#[async_trait]
impl SettingsRemoteDataSource for PlatformSettingsDataSource {
    async fn get_settings(&self, user_id: &str) -> DataSourceResult<SettingsModel> {
        match self.store.get(collections::SETTINGS, user_id).await? {
            Some(document) => decode(document),
            None => Ok(SettingsModel::default()),
        }
    }

    async fn save_settings(&self, user_id: &str, settings: SettingsModel) -> DataSourceResult<SettingsModel> {
        self.store
            .set(collections::SETTINGS, user_id, to_fields(&settings)?)
            .await?;
        Ok(settings)
    }

    async fn get_feature_flags(&self) -> DataSourceResult<FeatureFlagsModel> {
        let values = self.remote_config.fetch_all().await?;
        Ok(values
            .iter()
            .filter_map(|(name, value)| flag_value(name, value).map(|enabled| (name.clone(), enabled)))
            .collect())
    }
}
