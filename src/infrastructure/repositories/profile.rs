//! Profile repository

use crate::domain::shared::{Result, UserId};
use crate::domain::user::{BusinessOwnerRegistration, Profile, ProfileRepository, ProfileUpdate, UserRole};
use crate::infrastructure::local::{keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::profile as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::profile::{ProfileModel, ProfileRemoteDataSource};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub struct ProfileRepositoryImpl {
    remote: Arc<dyn ProfileRemoteDataSource>,
    profiles: LocalCache<ProfileModel>,
    reconciler: Reconciler,
}

impl ProfileRepositoryImpl {
    pub fn new(remote: Arc<dyn ProfileRemoteDataSource>, storage: Arc<dyn KeyValueStore>, reconciler: Reconciler) -> Self {
        Self {
            remote,
            profiles: LocalCache::new(storage, keys::PROFILE),
            reconciler,
        }
    }
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile> {
        self.reconciler
            .read(
                "get profile",
                ReadPolicy::NetworkFirst,
                Some((&self.profiles, user_id.as_str())),
                || self.remote.get_profile(user_id.as_str()),
                mapper::to_entity,
            )
            .await
    }

    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<Profile> {
        let changes = mapper::to_changes(update);
        let profile = self
            .reconciler
            .write("update your profile", || self.remote.update_profile(user_id.as_str(), changes))
            .await?;
        best_effort("update profile", self.profiles.put(&profile.id, &profile)).await;
        Ok(mapper::to_entity(profile))
    }

    async fn update_user_role(&self, user_id: &UserId, role: UserRole) -> Result<()> {
        self.reconciler
            .write("update roles", || self.remote.update_user_role(user_id.as_str(), role.as_str()))
            .await?;
        // The cached copy still carries the old role.
        best_effort("update role", self.profiles.remove(user_id.as_str())).await;
        info!("Role of {} changed to {}", user_id, role);
        Ok(())
    }

    async fn register_business_owner(&self, registration: BusinessOwnerRegistration) -> Result<Profile> {
        let request = mapper::to_request(registration);
        let profile = self
            .reconciler
            .write("register as a business owner", || self.remote.register_business_owner(request))
            .await?;
        best_effort("register business owner", self.profiles.put(&profile.id, &profile)).await;
        Ok(mapper::to_entity(profile))
    }
}
