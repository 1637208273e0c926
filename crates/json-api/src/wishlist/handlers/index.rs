//! Wishlist Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use storefront_app::domain::wishlists::models::WishlistEntry;

use crate::{
    extensions::*, products::ProductResponse, state::State, wishlist::into_status_error,
};

/// Wishlist entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistItemResponse {
    pub product_id: String,

    /// RFC 3339 timestamp
    pub added_at: String,

    /// Current catalog product; `null` once the product has been removed
    pub product: Option<ProductResponse>,
}

impl From<WishlistEntry> for WishlistItemResponse {
    fn from(entry: WishlistEntry) -> Self {
        WishlistItemResponse {
            product_id: entry.product_id.to_string(),
            added_at: entry.added_at.to_string(),
            product: entry.product.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    /// Entries in the order they were added
    pub items: Vec<WishlistItemResponse>,
}

/// Wishlist Index Handler
#[endpoint(
    tags("wishlist"),
    summary = "Get Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wishlist"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?;

    let entries = state
        .app
        .wishlists
        .list(&user.uid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(WishlistResponse {
        items: entries.into_iter().map(Into::into).collect(),
    }))
}
