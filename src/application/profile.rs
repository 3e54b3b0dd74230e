//! Profile and role use cases

use super::macros::use_case;
use crate::domain::shared::{Failure, Result, UserId};
use crate::domain::user::{BusinessOwnerRegistration, Permission, Profile, ProfileRepository, ProfileUpdate, UserRole};
use std::sync::Arc;
use tracing::{debug, info};

use_case! {
    GetProfile(ProfileRepository) => get_profile(user_id: &UserId) -> Profile;
    UpdateProfile(ProfileRepository) => update_profile(user_id: &UserId, update: ProfileUpdate) -> Profile;
    /// Promote a user to business owner
    RegisterBusinessOwner(ProfileRepository) => register_business_owner(registration: BusinessOwnerRegistration) -> Profile;
}

/// Change a user's role, given as its wire name
pub struct UpdateUserRole {
    repository: Arc<dyn ProfileRepository>,
}

impl UpdateUserRole {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Unknown role names are rejected without reaching the repository.
    pub async fn execute(&self, user_id: &UserId, role_name: &str) -> Result<()> {
        let Some(role) = UserRole::parse(role_name) else {
            debug!("Rejected role change of {} to {:?}", user_id, role_name);
            return Err(Failure::validation(format!("Invalid role: {}", role_name)));
        };
        self.repository.update_user_role(user_id, role).await
    }
}

/// Gate a dashboard or privileged action on the user's current role
pub struct RequirePermission {
    repository: Arc<dyn ProfileRepository>,
}

impl RequirePermission {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// The profile when its role grants `permission`, otherwise a permission failure
    pub async fn execute(&self, user_id: &UserId, permission: Permission) -> Result<Profile> {
        let profile = self.repository.get_profile(user_id).await?;
        if !profile.can(permission) {
            info!("Denied {} to {} ({})", permission.as_str(), user_id, profile.role);
            return Err(Failure::permission(format!(
                "Role {} does not grant {}",
                profile.role,
                permission.as_str()
            )));
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::FailureKind;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Profiles {}

        #[async_trait]
        impl ProfileRepository for Profiles {
            async fn get_profile(&self, user_id: &UserId) -> Result<Profile>;
            async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<Profile>;
            async fn update_user_role(&self, user_id: &UserId, role: UserRole) -> Result<()>;
            async fn register_business_owner(&self, registration: BusinessOwnerRegistration) -> Result<Profile>;
        }
    }

    #[tokio::test]
    async fn test_unknown_role_never_reaches_repository() {
        let mut repository = MockProfiles::new();
        repository.expect_update_user_role().never();
        let use_case = UpdateUserRole::new(Arc::new(repository));

        let failure = use_case
            .execute(&UserId::new("u1"), "superuser")
            .await
            .unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Validation);
        assert_eq!(failure.message(), "Invalid role: superuser");
    }

    #[tokio::test]
    async fn test_every_known_role_is_forwarded() {
        for role in UserRole::ALL {
            let mut repository = MockProfiles::new();
            repository
                .expect_update_user_role()
                .with(eq(UserId::new("u1")), eq(role))
                .times(1)
                .returning(|_, _| Ok(()));
            let use_case = UpdateUserRole::new(Arc::new(repository));

            assert_eq!(use_case.execute(&UserId::new("u1"), role.as_str()).await, Ok(()));
        }
    }

    #[tokio::test]
    async fn test_repository_failure_is_passed_through() {
        let mut repository = MockProfiles::new();
        repository
            .expect_update_user_role()
            .returning(|_, _| Err(Failure::permission("Only admins can change roles")));
        let use_case = UpdateUserRole::new(Arc::new(repository));

        let failure = use_case.execute(&UserId::new("u1"), "admin").await.unwrap_err();

        assert_eq!(failure, Failure::permission("Only admins can change roles"));
    }

    fn profile(role: UserRole) -> Profile {
        Profile {
            id: UserId::new("u1"),
            display_name: "Ada".to_string(),
            email: None,
            bio: None,
            avatar_url: None,
            role,
            followers_count: 0,
            following_count: 0,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_business_dashboard_requires_owner_role() {
        let mut repository = MockProfiles::new();
        repository
            .expect_get_profile()
            .returning(|_| Ok(profile(UserRole::SimpleUser)));
        let use_case = RequirePermission::new(Arc::new(repository));

        let failure = use_case
            .execute(&UserId::new("u1"), Permission::BusinessDashboard)
            .await
            .unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Permission);
        assert_eq!(failure.message(), "Role simple_user does not grant dashboard:business");
    }

    #[tokio::test]
    async fn test_granted_permission_returns_profile() {
        for (role, permission) in [
            (UserRole::BusinessOwner, Permission::BusinessDashboard),
            (UserRole::Moderator, Permission::ModerationQueue),
            (UserRole::Admin, Permission::ManageRoles),
        ] {
            let mut repository = MockProfiles::new();
            repository.expect_get_profile().returning(move |_| Ok(profile(role)));
            let use_case = RequirePermission::new(Arc::new(repository));

            let granted = use_case.execute(&UserId::new("u1"), permission).await.unwrap();

            assert_eq!(granted.role, role);
        }
    }

    #[tokio::test]
    async fn test_profile_lookup_failure_is_passed_through() {
        let mut repository = MockProfiles::new();
        repository
            .expect_get_profile()
            .returning(|_| Err(Failure::network("No internet connection and no cached data available")));
        let use_case = RequirePermission::new(Arc::new(repository));

        let failure = use_case
            .execute(&UserId::new("u1"), Permission::AdminDashboard)
            .await
            .unwrap_err();

        assert_eq!(failure.kind(), FailureKind::Network);
    }
}
