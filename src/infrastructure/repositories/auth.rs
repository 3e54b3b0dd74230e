//! Authentication repository

use crate::domain::auth::{AuthRepository, AuthUser, SignUp};
use crate::domain::shared::Result;
use crate::infrastructure::local::{clear_prefix, keys, KeyValueStore, LocalCache};
use crate::infrastructure::mappers::auth as mapper;
use crate::infrastructure::reconcile::{best_effort, ReadPolicy, Reconciler};
use crate::infrastructure::remote::auth::{AuthRemoteDataSource, AuthUserModel};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const SESSION: &str = "current";

pub struct AuthRepositoryImpl {
    remote: Arc<dyn AuthRemoteDataSource>,
    storage: Arc<dyn KeyValueStore>,
    session: LocalCache<Option<AuthUserModel>>,
    reconciler: Reconciler,
}

impl AuthRepositoryImpl {
    pub fn new(remote: Arc<dyn AuthRemoteDataSource>, storage: Arc<dyn KeyValueStore>, reconciler: Reconciler) -> Self {
        Self {
            session: LocalCache::new(storage.clone(), keys::AUTH_SESSION),
            remote,
            storage,
            reconciler,
        }
    }

    async fn remember(&self, op: &str, user: &AuthUserModel) {
        best_effort(op, self.session.put(SESSION, &Some(user.clone()))).await;
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        let user = self
            .reconciler
            .write("sign in", || self.remote.sign_in(email, password))
            .await?;
        self.remember("sign in", &user).await;
        info!("User {} signed in", user.uid);
        Ok(mapper::to_entity(user))
    }

    async fn sign_up(&self, data: SignUp) -> Result<AuthUser> {
        let user = self
            .reconciler
            .write("sign up", || {
                self.remote.sign_up(&data.email, &data.password, &data.display_name)
            })
            .await?;
        self.remember("sign up", &user).await;
        info!("User {} signed up", user.uid);
        Ok(mapper::to_entity(user))
    }

    async fn sign_out(&self) -> Result<()> {
        self.reconciler
            .write("sign out", || self.remote.sign_out())
            .await?;
        // The remote session is gone; leftover local data must not fail the call.
        best_effort("sign out", clear_prefix(self.storage.as_ref(), keys::ROOT)).await;
        info!("User signed out");
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        self.reconciler
            .read(
                "current user",
                ReadPolicy::NetworkFirst,
                Some((&self.session, SESSION)),
                || self.remote.current_user(),
                |user| user.map(mapper::to_entity),
            )
            .await
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        self.reconciler
            .write("send a password reset", || self.remote.send_password_reset(email))
            .await
    }

    async fn change_email(&self, current_password: &str, new_email: &str) -> Result<AuthUser> {
        let user = self
            .reconciler
            .write("change email", || self.remote.change_email(current_password, new_email))
            .await?;
        self.remember("change email", &user).await;
        Ok(mapper::to_entity(user))
    }

    async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        self.reconciler
            .write("change password", || {
                self.remote.change_password(current_password, new_password)
            })
            .await
    }
}
