//! Auth repository interface

use super::entity::{AuthUser, SignUp};
use crate::domain::shared::Result;
use async_trait::async_trait;

/// Auth repository trait
///
/// Authentication failures are always reported as `Failure::Auth`, never as a
/// generic server failure.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// Create the account and its profile document
    async fn sign_up(&self, data: SignUp) -> Result<AuthUser>;

    /// Sign out remotely and clear local session data.
    ///
    /// Succeeds whenever the remote sign-out succeeds, even if local cleanup fails.
    async fn sign_out(&self) -> Result<()>;

    /// Current session, or `None` when signed out
    async fn current_user(&self) -> Result<Option<AuthUser>>;

    async fn send_password_reset(&self, email: &str) -> Result<()>;

    async fn change_email(&self, current_password: &str, new_email: &str) -> Result<AuthUser>;

    async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()>;
}
