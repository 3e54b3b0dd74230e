//! Wishlist entity

use crate::domain::shared::BusinessId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business saved to the user's wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub business_id: BusinessId,
    pub business_name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub added_at: DateTime<Utc>,
}
