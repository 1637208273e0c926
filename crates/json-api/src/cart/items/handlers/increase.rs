//! Increase Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    cart::{CartChangeResponse, into_status_error},
    extensions::*,
    products::parse_product_id,
    state::State,
};

/// Increase Cart Item Handler
///
/// Adds one unit to an existing line.
#[endpoint(
    tags("cart"),
    summary = "Increase Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity increased"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Product is not in the cart"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartChangeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?;
    let product = parse_product_id(product.into_inner())?;

    let change = state
        .app
        .carts
        .increase_item(&user.uid, &product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartChangeResponse::from_change(&change)?))
}
