//! Review domain

pub mod entity;
pub mod repository;

pub use entity::{is_valid_rating, NewReview, Review, ReviewUpdate, MAX_RATING, MIN_RATING};
pub use repository::ReviewRepository;
