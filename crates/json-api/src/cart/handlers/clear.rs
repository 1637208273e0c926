//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{CartChangeResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartChangeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?;

    let change = state
        .app
        .carts
        .clear_cart(&user.uid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartChangeResponse::from_change(&change)?))
}
