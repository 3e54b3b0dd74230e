//! Profile repository interface

use super::entity::{BusinessOwnerRegistration, Profile, ProfileUpdate};
use super::role::UserRole;
use crate::domain::shared::{Result, UserId};
use async_trait::async_trait;

/// Profile repository trait
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile, falling back to the cached copy when the backend fails
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile>;

    /// Update editable profile fields
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<Profile>;

    /// Change the role of a user (admin only, enforced by the backend)
    async fn update_user_role(&self, user_id: &UserId, role: UserRole) -> Result<()>;

    /// Register the user as owner of a business
    async fn register_business_owner(&self, registration: BusinessOwnerRegistration) -> Result<Profile>;
}
