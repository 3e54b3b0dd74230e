//! Business entity

use crate::domain::shared::{BusinessId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business listed on ReviewHub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: BusinessId,
    pub owner_id: Option<UserId>,
    pub name: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub rating_average: f64,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Business creation data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBusiness {
    pub owner_id: Option<UserId>,
    pub name: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

/// Partial business update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

impl Business {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id.as_ref() == Some(user_id)
    }
}
