use crate::domain::auth::AuthUser;
use crate::domain::shared::UserId;
use crate::infrastructure::remote::auth::AuthUserModel;

pub fn to_entity(model: AuthUserModel) -> AuthUser {
    AuthUser {
        id: UserId::new(model.uid),
        email: model.email,
        display_name: model.display_name,
        email_verified: model.email_verified,
    }
}
