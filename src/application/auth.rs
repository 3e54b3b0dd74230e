//! Authentication use cases

use super::macros::use_case;
use crate::domain::auth::{AuthRepository, AuthUser, SignUp};

use_case! {
    SignIn(AuthRepository) => sign_in(email: &str, password: &str) -> AuthUser;
    /// Create an account and its profile
    SignUpUser(AuthRepository) => sign_up(data: SignUp) -> AuthUser;
    SignOut(AuthRepository) => sign_out() -> ();
    GetCurrentUser(AuthRepository) => current_user() -> Option<AuthUser>;
    SendPasswordReset(AuthRepository) => send_password_reset(email: &str) -> ();
    ChangeEmail(AuthRepository) => change_email(current_password: &str, new_email: &str) -> AuthUser;
    ChangePassword(AuthRepository) => change_password(current_password: &str, new_password: &str) -> ();
}
