use crate::domain::business::Business;
use crate::domain::shared::{BusinessId, UserId};
use crate::domain::wishlist::WishlistItem;
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::remote::wishlist::WishlistItemModel;

pub fn to_entity(model: WishlistItemModel) -> WishlistItem {
    WishlistItem {
        business_id: BusinessId::new(model.business_id),
        business_name: model.business_name,
        category: model.category,
        image_url: model.image_url,
        added_at: model.added_at.to_datetime(),
    }
}

/// Snapshot of `business` saved by `user_id`
pub fn to_model(user_id: &UserId, business: &Business) -> WishlistItemModel {
    WishlistItemModel {
        user_id: user_id.as_str().to_string(),
        business_id: business.id.as_str().to_string(),
        business_name: business.name.clone(),
        category: business.category.clone(),
        image_url: business.image_url.clone(),
        added_at: WireTimestamp::now(),
    }
}
