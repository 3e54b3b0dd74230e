use crate::domain::user::{BusinessOwnerRegistration, Profile, ProfileUpdate, UserRole};
use crate::domain::shared::UserId;
use crate::infrastructure::remote::profile::{BusinessOwnerRequest, ProfileChanges, ProfileModel};

pub fn to_entity(model: ProfileModel) -> Profile {
    Profile {
        id: UserId::new(model.id),
        display_name: model.display_name,
        email: model.email,
        bio: model.bio,
        avatar_url: model.avatar_url,
        // Unknown roles get the least privileged one
        role: UserRole::parse(&model.role).unwrap_or_default(),
        followers_count: model.followers_count,
        following_count: model.following_count,
        created_at: model.created_at.to_datetime(),
    }
}

pub fn to_changes(update: ProfileUpdate) -> ProfileChanges {
    ProfileChanges {
        display_name: update.display_name,
        bio: update.bio,
        avatar_url: update.avatar_url,
    }
}

pub fn to_request(registration: BusinessOwnerRegistration) -> BusinessOwnerRequest {
    BusinessOwnerRequest {
        user_id: registration.user_id.into_inner(),
        business_name: registration.business_name,
        phone: registration.phone,
    }
}
