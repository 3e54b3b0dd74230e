//! Settings repository interface

use super::entity::{FeatureFlags, Settings, SettingsUpdate};
use crate::domain::shared::{Result, UserId};
use async_trait::async_trait;

/// Settings repository trait
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Served from the local cache when present
    async fn get_settings(&self, user_id: &UserId) -> Result<Settings>;

    async fn update_settings(&self, user_id: &UserId, update: SettingsUpdate) -> Result<Settings>;

    async fn get_feature_flags(&self) -> Result<FeatureFlags>;
}
