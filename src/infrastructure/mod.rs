//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - Platform ports and their in-memory adapters
//! - Remote data sources and the wire models they exchange
//! - Local persistence (device key-value storage and typed caches)
//! - The reconciliation policy shared by all repositories
//! - Repository implementations

pub mod connectivity;
pub mod error;
pub mod local;
pub mod mappers;
pub mod platform;
pub mod reconcile;
pub mod remote;
pub mod repositories;
