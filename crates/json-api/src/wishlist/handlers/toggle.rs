//! Toggle Wishlist Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::domain::wishlists::models::WishlistToggle;

use crate::{
    extensions::*, products::parse_product_id, state::State, wishlist::into_status_error,
};

/// Wishlist change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ToggleOutcome {
    Added,
    Removed,
}

impl From<WishlistToggle> for ToggleOutcome {
    fn from(toggle: WishlistToggle) -> Self {
        match toggle {
            WishlistToggle::Added => Self::Added,
            WishlistToggle::Removed => Self::Removed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ToggleResponse {
    pub product_id: String,
    pub outcome: ToggleOutcome,
}

/// Toggle Wishlist Product Handler
///
/// Adds the product when it is not on the wishlist and removes it otherwise.
#[endpoint(
    tags("wishlist"),
    summary = "Toggle Wishlist Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wishlist updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ToggleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?;
    let product = parse_product_id(product.into_inner())?;

    let toggle = state
        .app
        .wishlists
        .toggle(&user.uid, &product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ToggleResponse {
        product_id: product.to_string(),
        outcome: toggle.into(),
    }))
}
