//! Update Product Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error, parse_product_id},
    state::State,
};

/// Update Stock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStockRequest {
    /// New unit count; `null` stops tracking inventory
    pub stock: Option<u32>,
}

/// Update Product Stock Handler
#[endpoint(
    tags("products"),
    summary = "Update Product Stock",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<UpdateStockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = parse_product_id(product.into_inner())?;

    let updated = state
        .app
        .products
        .update_stock(&product, json.into_inner().stock)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
