//! Review entity

use crate::domain::shared::{BusinessId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted star rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating
pub const MAX_RATING: u8 = 5;

/// A review of a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub business_id: BusinessId,
    pub author_id: UserId,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Review creation data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub business_id: BusinessId,
    pub author_id: UserId,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
}

/// Partial review update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

/// Whether `rating` lies in the accepted star range
pub fn is_valid_rating(rating: u8) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(!is_valid_rating(0));
        assert!(is_valid_rating(1));
        assert!(is_valid_rating(5));
        assert!(!is_valid_rating(6));
    }
}
