//! Shared kernel - Common types used across all feature areas

pub mod error;
pub mod pagination;
pub mod result;
pub mod value_objects;

pub use error::{Failure, FailureKind};
pub use pagination::{has_more, Cursor, Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use result::{failure, success, Fold, Result};
pub use value_objects::*;
