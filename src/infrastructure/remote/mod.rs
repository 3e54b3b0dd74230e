//! Remote data sources
//!
//! One data source per feature wraps the platform ports, exchanges wire
//! models (snake_case records) and translates [`PlatformError`] codes into the
//! [`DataSourceError`] taxonomy.

pub mod auth;
pub mod business;
pub mod chat;
pub mod feed;
pub mod notification;
pub mod profile;
pub mod review;
pub mod settings;
pub mod wishlist;

pub use auth::PlatformAuthDataSource;
pub use business::PlatformBusinessDataSource;
pub use chat::PlatformChatDataSource;
pub use feed::PlatformFeedDataSource;
pub use notification::PlatformNotificationDataSource;
pub use profile::PlatformProfileDataSource;
pub use review::PlatformReviewDataSource;
pub use settings::PlatformSettingsDataSource;
pub use wishlist::PlatformWishlistDataSource;

use crate::domain::shared::PageRequest;
use crate::infrastructure::error::{DataSourceError, DataSourceResult};
use crate::infrastructure::platform::{Document, Fields, PlatformError, Query};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Collection names in the document database
pub mod collections {
    pub const USERS: &str = "users";
    pub const BUSINESSES: &str = "businesses";
    pub const REVIEWS: &str = "reviews";
    pub const POSTS: &str = "posts";
    pub const COMMENTS: &str = "comments";
    pub const CONVERSATIONS: &str = "conversations";
    pub const MESSAGES: &str = "messages";
    pub const WISHLISTS: &str = "wishlists";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const SETTINGS: &str = "settings";
}

/// Cursor and size of a page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub cursor: Option<String>,
    pub limit: usize,
}

impl PageQuery {
    pub fn first(limit: usize) -> Self {
        Self { cursor: None, limit }
    }

    /// Apply the cursor and limit to `query`
    pub fn apply(&self, query: Query) -> Query {
        query.start_after(self.cursor.as_deref()).limit(self.limit)
    }
}

impl From<&PageRequest> for PageQuery {
    fn from(page: &PageRequest) -> Self {
        Self {
            cursor: page.cursor.as_ref().map(|c| c.as_str().to_string()),
            limit: page.page_size,
        }
    }
}

/// Friendly message for a known auth code
fn auth_message(code: &str) -> Option<&'static str> {
    let message = match code {
        "auth/wrong-password" | "auth/invalid-credential" => "Incorrect password",
        "auth/user-not-found" => "No account found with this email",
        "auth/email-already-in-use" => "An account already exists with this email",
        "auth/weak-password" => "Password should be at least 6 characters",
        "auth/invalid-email" => "Invalid email address",
        "auth/too-many-requests" => "Too many attempts. Please try again later",
        "auth/requires-recent-login" => "Please sign in again to continue",
        "auth/no-current-user" => "You are not signed in",
        "auth/network-request-failed" => "Network error during authentication",
        _ => return None,
    };
    Some(message)
}

/// Translate a platform error code into the data source taxonomy.
///
/// Auth codes are matched first, so an auth failure is never reported as a
/// generic server or network error.
pub fn translate_platform_error(error: PlatformError) -> DataSourceError {
    let PlatformError { code, message } = error;

    if code.starts_with("auth/") {
        let message = auth_message(&code).map(str::to_string).unwrap_or(message);
        return DataSourceError::auth(message).with_code(code);
    }

    let translated = match code.as_str() {
        "unauthenticated" => DataSourceError::auth(message),
        "permission-denied" => DataSourceError::permission(message),
        "unavailable" | "deadline-exceeded" | "network-error" => DataSourceError::network(message),
        "invalid-argument" | "failed-precondition" | "out-of-range" => DataSourceError::validation(message),
        _ => DataSourceError::server(message),
    };
    translated.with_code(code)
}

impl From<PlatformError> for DataSourceError {
    fn from(error: PlatformError) -> Self {
        translate_platform_error(error)
    }
}

/// Encode a wire model as top-level document fields
pub(crate) fn to_fields<T: Serialize>(value: &T) -> DataSourceResult<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(mut fields) => {
            // The id lives in the document path, not in its body.
            fields.remove("id");
            Ok(fields)
        }
        other => Err(DataSourceError::unexpected(format!("expected an object, got {}", other))),
    }
}

/// Decode a document into a wire model
pub(crate) fn decode<M: DeserializeOwned>(document: Document) -> DataSourceResult<M> {
    Ok(document.decode()?)
}

/// Decode every document of a query result
pub(crate) fn decode_all<M: DeserializeOwned>(documents: Vec<Document>) -> DataSourceResult<Vec<M>> {
    documents.into_iter().map(decode).collect()
}

/// Decode a document or report it missing
pub(crate) fn require<M: DeserializeOwned>(
    document: Option<Document>,
    what: &str,
) -> DataSourceResult<M> {
    match document {
        Some(document) => decode(document),
        None => Err(DataSourceError::server(format!("{} not found", what)).with_code("not-found")),
    }
}
