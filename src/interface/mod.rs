//! Interface layer - Presentation state
//!
//! This layer holds the view state the screens render from:
//! - Loaded lists and their pagination markers
//! - Loading and error flags, errors shown verbatim
//! - Optimistic updates with rollback when the remote call fails

pub mod state;

pub use state::{FeedState, FeedStore, NotificationState, NotificationStore, WishlistState, WishlistStore};
