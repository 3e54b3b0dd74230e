//! Wire model to entity mappers
//!
//! Pure functions. Missing or unknown wire values were already defaulted by
//! the models' serde attributes; mappers only reshape and convert types.

pub mod auth;
pub mod business;
pub mod chat;
pub mod feed;
pub mod notification;
pub mod profile;
pub mod review;
pub mod settings;
pub mod wishlist;
