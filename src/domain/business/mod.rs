//! Business domain

pub mod entity;
pub mod repository;

pub use entity::{Business, BusinessUpdate, NewBusiness};
pub use repository::BusinessRepository;
