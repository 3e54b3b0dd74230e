//! Settings entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    System,
}

/// Per-user application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub push_notifications: bool,
    pub email_notifications: bool,
    pub theme: Theme,
    pub language: String,
    pub private_profile: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            push_notifications: true,
            email_notifications: false,
            theme: Theme::System,
            language: "en".to_string(),
            private_profile: false,
        }
    }
}

/// Partial settings update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub push_notifications: Option<bool>,
    pub email_notifications: Option<bool>,
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub private_profile: Option<bool>,
}

impl Settings {
    /// Apply the fields present in `update`
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(v) = update.push_notifications {
            self.push_notifications = v;
        }
        if let Some(v) = update.email_notifications {
            self.email_notifications = v;
        }
        if let Some(v) = update.theme {
            self.theme = v;
        }
        if let Some(v) = &update.language {
            self.language = v.clone();
        }
        if let Some(v) = update.private_profile {
            self.private_profile = v;
        }
    }
}

/// Remote-config feature flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlags(BTreeMap<String, bool>);

impl FeatureFlags {
    pub fn new(flags: BTreeMap<String, bool>) -> Self {
        Self(flags)
    }

    /// Unknown flags are disabled
    pub fn is_enabled(&self, flag: &str) -> bool {
        self.0.get(flag).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
