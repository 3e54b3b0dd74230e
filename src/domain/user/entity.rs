//! User profile entity

use super::role::{Permission, UserRole};
use crate::domain::shared::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub display_name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub followers_count: u32,
    pub following_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.bio.is_none() && self.avatar_url.is_none()
    }
}

/// Request to promote the caller to business owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessOwnerRegistration {
    pub user_id: UserId,
    pub business_name: String,
    pub phone: Option<String>,
}

impl Profile {
    /// Whether this profile's role grants `permission`
    pub fn can(&self, permission: Permission) -> bool {
        self.role.has_permission(permission)
    }
}
