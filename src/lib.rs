//! ReviewHub - Client core of a business review and social platform
//!
//! This is a Domain-Driven Design (DDD) implementation of the data layer of
//! a mobile client: repositories that reconcile a remote backend with an
//! on-device cache, use cases on top of them, and view-state stores with
//! optimistic updates.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use app::{App, MemoryPlatform, Platform};
pub use config::Config;
pub use domain::shared::error::{Failure, FailureKind};
pub use domain::shared::result::{Fold, Result};
