use crate::domain::business::{Business, BusinessUpdate, NewBusiness};
use crate::domain::shared::{BusinessId, UserId};
use crate::infrastructure::local::WireTimestamp;
use crate::infrastructure::remote::business::{BusinessChanges, BusinessModel};

pub fn to_entity(model: BusinessModel) -> Business {
    Business {
        id: BusinessId::new(model.id),
        owner_id: model.owner_id.map(UserId::new),
        name: model.name,
        category: model.category,
        description: model.description,
        address: model.address,
        phone: model.phone,
        image_url: model.image_url,
        rating_average: model.rating_average,
        review_count: model.review_count,
        created_at: model.created_at.to_datetime(),
    }
}

/// New record; the id is assigned by the store
pub fn to_model(data: NewBusiness) -> BusinessModel {
    BusinessModel {
        id: String::new(),
        owner_id: data.owner_id.map(UserId::into_inner),
        name_lower: data.name.to_lowercase(),
        name: data.name,
        category: data.category,
        description: data.description,
        address: data.address,
        phone: data.phone,
        image_url: data.image_url,
        rating_average: 0.0,
        review_count: 0,
        created_at: WireTimestamp::now(),
    }
}

pub fn to_changes(update: BusinessUpdate) -> BusinessChanges {
    BusinessChanges {
        name_lower: None,
        name: update.name,
        category: update.category,
        description: update.description,
        address: update.address,
        phone: update.phone,
        image_url: update.image_url,
    }
}
