//! Settings and feature flag repository

use crate::domain::settings::{FeatureFlags, Settings, SettingsRepository, SettingsUpdate};
use crate::domain::shared::{Result, UserId};
use crate::infrastructure::error::DataSourceResult;
use crate::infrastructure::local::{keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::settings as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::settings::{FeatureFlagsModel, SettingsModel, SettingsRemoteDataSource};
use async_trait::async_trait;
use std::sync::Arc;

const FLAGS: &str = "all";

pub struct SettingsRepositoryImpl {
    remote: Arc<dyn SettingsRemoteDataSource>,
    /// Keyed by user id
    settings: LocalCache<SettingsModel>,
    flags: LocalCache<FeatureFlagsModel>,
    reconciler: Reconciler,
}

impl SettingsRepositoryImpl {
    pub fn new(remote: Arc<dyn SettingsRemoteDataSource>, storage: Arc<dyn KeyValueStore>, reconciler: Reconciler) -> Self {
        Self {
            remote,
            settings: LocalCache::new(storage.clone(), keys::SETTINGS),
            flags: LocalCache::new(storage, keys::FEATURE_FLAGS),
            reconciler,
        }
    }

    /// Apply `update` on top of the stored settings
    async fn merge(&self, user_id: &str, update: SettingsUpdate) -> DataSourceResult<SettingsModel> {
        let mut current = mapper::to_entity(self.remote.get_settings(user_id).await?);
        current.apply(&update);
        self.remote.save_settings(user_id, mapper::to_model(current)).await
    }
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryImpl {
    async fn get_settings(&self, user_id: &UserId) -> Result<Settings> {
        self.reconciler
            .read(
                "get settings",
                ReadPolicy::CacheFirst,
                Some((&self.settings, user_id.as_str())),
                || self.remote.get_settings(user_id.as_str()),
                mapper::to_entity,
            )
            .await
    }

    async fn update_settings(&self, user_id: &UserId, update: SettingsUpdate) -> Result<Settings> {
        let saved = self
            .reconciler
            .write("update settings", || self.merge(user_id.as_str(), update))
            .await?;
        best_effort("update settings", self.settings.put(user_id.as_str(), &saved)).await;
        Ok(mapper::to_entity(saved))
    }

    async fn get_feature_flags(&self) -> Result<FeatureFlags> {
        self.reconciler
            .read(
                "get feature flags",
                ReadPolicy::NetworkFirst,
                Some((&self.flags, FLAGS)),
                || self.remote.get_feature_flags(),
                mapper::flags_to_entity,
            )
            .await
    }
}
