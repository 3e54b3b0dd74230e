//! Wishlist use cases

use super::macros::use_case;
use crate::domain::business::Business;
use crate::domain::shared::{BusinessId, UserId};
use crate::domain::wishlist::{WishlistItem, WishlistRepository};

use_case! {
    GetWishlist(WishlistRepository) => get_wishlist(user_id: &UserId) -> Vec<WishlistItem>;
    AddToWishlist(WishlistRepository) => add_to_wishlist(user_id: &UserId, business: &Business) -> WishlistItem;
    RemoveFromWishlist(WishlistRepository) => remove_from_wishlist(user_id: &UserId, business_id: &BusinessId) -> ();
    IsInWishlist(WishlistRepository) => is_in_wishlist(user_id: &UserId, business_id: &BusinessId) -> bool;
}
