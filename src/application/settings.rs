//! Settings use cases

use super::macros::use_case;
use crate::domain::settings::{FeatureFlags, Settings, SettingsRepository, SettingsUpdate};
use crate::domain::shared::UserId;

use_case! {
    GetSettings(SettingsRepository) => get_settings(user_id: &UserId) -> Settings;
    UpdateSettings(SettingsRepository) => update_settings(user_id: &UserId, update: SettingsUpdate) -> Settings;
    GetFeatureFlags(SettingsRepository) => get_feature_flags() -> FeatureFlags;
}
