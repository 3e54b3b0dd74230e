//! Wishlist domain

pub mod entity;
pub mod repository;

pub use entity::WishlistItem;
pub use repository::WishlistRepository;
