//! Domain failures
//!
//! Every repository operation reports its outcome as a [`Failure`] instead of
//! raising an error. The set is closed: presentation code can match on it
//! exhaustively and show [`Failure::message`] verbatim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure returned across the repository boundary
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Failure {
    /// The remote platform reported a definite error
    #[error("{0}")]
    Server(String),

    /// No connectivity, or a network-level failure occurred
    #[error("{0}")]
    Network(String),

    /// The local persistence layer failed to read or write
    #[error("{0}")]
    Cache(String),

    /// Authentication rejected the operation
    #[error("{0}")]
    Auth(String),

    /// Caller-supplied input failed a precondition
    #[error("{0}")]
    Validation(String),

    /// The caller lacks rights for the operation
    #[error("{0}")]
    Permission(String),
}

/// Discriminant of a [`Failure`], handy for assertions and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Server,
    Network,
    Cache,
    Auth,
    Validation,
    Permission,
}

impl Failure {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission(message.into())
    }

    /// Human-readable message, safe to display
    pub fn message(&self) -> &str {
        match self {
            Failure::Server(m)
            | Failure::Network(m)
            | Failure::Cache(m)
            | Failure::Auth(m)
            | Failure::Validation(m)
            | Failure::Permission(m) => m,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Server(_) => FailureKind::Server,
            Failure::Network(_) => FailureKind::Network,
            Failure::Cache(_) => FailureKind::Cache,
            Failure::Auth(_) => FailureKind::Auth,
            Failure::Validation(_) => FailureKind::Validation,
            Failure::Permission(_) => FailureKind::Permission,
        }
    }
}
