//! Settings and remote configuration domain

pub mod entity;
pub mod repository;

pub use entity::{FeatureFlags, Settings, SettingsUpdate, Theme};
pub use repository::SettingsRepository;
