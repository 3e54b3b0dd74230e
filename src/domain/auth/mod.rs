//! Authentication domain

pub mod entity;
pub mod repository;

pub use entity::{AuthUser, SignUp};
pub use repository::AuthRepository;
