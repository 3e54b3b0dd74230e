//! Data source errors
//!
//! Remote and local data sources report failures with [`DataSourceError`].
//! Repositories catch them and translate them into the domain [`Failure`];
//! they never reach the application or interface layers.

use crate::domain::shared::Failure;
use thiserror::Error;

/// Message reported for anything outside the known taxonomy
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Data source error taxonomy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("server error: {message}")]
    Server { message: String, code: Option<String> },

    #[error("cache error: {message}")]
    Cache { message: String, code: Option<String> },

    #[error("network error: {message}")]
    Network { message: String, code: Option<String> },

    #[error("auth error: {message}")]
    Auth { message: String, code: Option<String> },

    #[error("validation error: {message}")]
    Validation { message: String, code: Option<String> },

    #[error("permission error: {message}")]
    Permission { message: String, code: Option<String> },

    /// Malformed payloads, decode errors and other surprises
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Data source result type
pub type DataSourceResult<T> = std::result::Result<T, DataSourceError>;

impl DataSourceError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server { message: message.into(), code: None }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache { message: message.into(), code: None }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into(), code: None }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth { message: message.into(), code: None }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), code: None }
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission { message: message.into(), code: None }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected(detail.into())
    }

    /// Attach a provider-specific error code
    pub fn with_code(self, code: impl Into<String>) -> Self {
        let code = Some(code.into());
        match self {
            Self::Server { message, .. } => Self::Server { message, code },
            Self::Cache { message, .. } => Self::Cache { message, code },
            Self::Network { message, .. } => Self::Network { message, code },
            Self::Auth { message, .. } => Self::Auth { message, code },
            Self::Validation { message, .. } => Self::Validation { message, code },
            Self::Permission { message, .. } => Self::Permission { message, code },
            Self::Unexpected(detail) => Self::Unexpected(detail),
        }
    }

    /// Provider-specific error code, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Server { code, .. }
            | Self::Cache { code, .. }
            | Self::Network { code, .. }
            | Self::Auth { code, .. }
            | Self::Validation { code, .. }
            | Self::Permission { code, .. } => code.as_deref(),
            Self::Unexpected(_) => None,
        }
    }

    /// Errors that a cached copy may stand in for
    pub fn allows_cache_fallback(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Network { .. })
    }

    /// Translate into the domain failure reported to callers
    pub fn into_failure(self) -> Failure {
        match self {
            Self::Server { message, .. } => Failure::Server(message),
            Self::Network { message, .. } => Failure::Network(message),
            Self::Cache { message, .. } => Failure::Cache(message),
            Self::Auth { message, .. } => Failure::Auth(message),
            Self::Validation { message, .. } => Failure::Validation(message),
            Self::Permission { message, .. } => Failure::Permission(message),
            Self::Unexpected(_) => Failure::Server(UNEXPECTED_MESSAGE.to_string()),
        }
    }
}

impl From<DataSourceError> for Failure {
    fn from(error: DataSourceError) -> Self {
        error.into_failure()
    }
}

impl From<serde_json::Error> for DataSourceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Unexpected(format!("malformed payload: {}", e))
    }
}
