//! User domain: profiles and roles

pub mod entity;
pub mod repository;
pub mod role;

pub use entity::{BusinessOwnerRegistration, Profile, ProfileUpdate};
pub use repository::ProfileRepository;
pub use role::{Permission, UserRole};
