//! Ports to the backend-as-a-service platform
//!
//! These traits are thin wrappers over the platform SDK surfaces the client
//! uses: a document database, email/password authentication, callable
//! functions and remote configuration. Their semantics are the platform's;
//! errors come back as [`PlatformError`] carrying the provider code.

pub mod functions;
pub mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

pub use functions::deploy_user_functions;
pub use memory::{MemoryAuthProvider, MemoryDocumentStore, MemoryFunctions, StaticRemoteConfig};

/// Error reported by the platform SDK
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct PlatformError {
    pub code: String,
    pub message: String,
}

impl PlatformError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Platform result type
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Top-level document fields
pub type Fields = Map<String, Value>;

/// A stored document with its generated identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    /// Decode the document into a wire model, exposing the id as field `id`
    pub fn decode<M: DeserializeOwned>(self) -> serde_json::Result<M> {
        let mut data = self.data;
        data.insert("id".to_string(), Value::String(self.id));
        serde_json::from_value(Value::Object(data))
    }
}

/// Query filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field == value`
    Eq(String, Value),
    /// Array `field` contains `value`
    ArrayContains(String, Value),
    /// String `field` starts with the prefix
    Prefix(String, String),
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Collection query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, Direction)>,
    pub start_after: Option<String>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.to_string(), value.into()));
        self
    }

    pub fn array_contains(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::ArrayContains(field.to_string(), value.into()));
        self
    }

    pub fn starts_with(mut self, field: &str, prefix: &str) -> Self {
        self.filters.push(Filter::Prefix(field.to_string(), prefix.to_string()));
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    /// Resume after the document with this id
    pub fn start_after(mut self, document_id: Option<&str>) -> Self {
        self.start_after = document_id.map(str::to_string);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> PlatformResult<Option<Document>>;

    /// Insert with a generated id and return it
    async fn add(&self, collection: &str, data: Fields) -> PlatformResult<String>;

    /// Create or replace the document with a known id
    async fn set(&self, collection: &str, id: &str, data: Fields) -> PlatformResult<()>;

    /// Merge top-level fields into an existing document
    async fn update(&self, collection: &str, id: &str, partial: Fields) -> PlatformResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> PlatformResult<()>;

    async fn query(&self, collection: &str, query: &Query) -> PlatformResult<Vec<Document>>;

    /// Atomically add `by` to a numeric field
    async fn increment(&self, collection: &str, id: &str, field: &str, by: i64) -> PlatformResult<()>;

    /// Add `value` to an array field unless already present
    async fn array_union(&self, collection: &str, id: &str, field: &str, value: Value) -> PlatformResult<()>;

    /// Remove every occurrence of `value` from an array field
    async fn array_remove(&self, collection: &str, id: &str, field: &str, value: Value) -> PlatformResult<()>;
}

/// Authenticated account as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRecord {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

/// Email/password authentication
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> PlatformResult<AuthRecord>;

    async fn create_user(&self, email: &str, password: &str, display_name: &str) -> PlatformResult<AuthRecord>;

    async fn sign_out(&self) -> PlatformResult<()>;

    async fn current_user(&self) -> PlatformResult<Option<AuthRecord>>;

    async fn send_password_reset(&self, email: &str) -> PlatformResult<()>;

    /// Re-authenticate with `current_password`, then change the email
    async fn update_email(&self, current_password: &str, new_email: &str) -> PlatformResult<AuthRecord>;

    /// Re-authenticate with `current_password`, then change the password
    async fn update_password(&self, current_password: &str, new_password: &str) -> PlatformResult<()>;
}

/// Callable serverless functions
#[async_trait]
pub trait FunctionsClient: Send + Sync {
    async fn call(&self, name: &str, payload: Value) -> PlatformResult<Value>;
}

/// Remote configuration
#[async_trait]
pub trait RemoteConfig: Send + Sync {
    /// Fetch, activate and return every parameter
    async fn fetch_all(&self) -> PlatformResult<BTreeMap<String, Value>>;
}

/// Callable that returns a user profile by id
pub const FN_GET_PROFILE_BY_ID: &str = "getProfileById";
/// Callable that promotes a user to business owner
pub const FN_REGISTER_BUSINESS_OWNER: &str = "registerBusinessOwner";
/// Callable that changes the role of a user
pub const FN_UPDATE_USER_ROLE: &str = "updateUserRole";
