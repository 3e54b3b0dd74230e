//! Auth entities

use crate::domain::shared::UserId;
use serde::{Deserialize, Serialize};

/// Signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

/// Account creation data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub display_name: String,
}
