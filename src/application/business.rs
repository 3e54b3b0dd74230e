//! Business directory use cases

use super::macros::use_case;
use crate::domain::business::{Business, BusinessRepository, BusinessUpdate, NewBusiness};
use crate::domain::shared::{BusinessId, Page, PageRequest};

use_case! {
    GetBusiness(BusinessRepository) => get_business(id: &BusinessId) -> Business;
    /// List businesses, optionally restricted to one category
    ListBusinesses(BusinessRepository) => list_businesses(category: Option<&str>, page: PageRequest) -> Page<Business>;
    SearchBusinesses(BusinessRepository) => search_businesses(term: &str, page: PageRequest) -> Page<Business>;
    CreateBusiness(BusinessRepository) => create_business(data: NewBusiness) -> Business;
    UpdateBusiness(BusinessRepository) => update_business(id: &BusinessId, update: BusinessUpdate) -> Business;
    DeleteBusiness(BusinessRepository) => delete_business(id: &BusinessId) -> ();
}
