//! Review Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::parse_product_id,
    reviews::{ReviewResponse, into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewsResponse {
    /// Reviews, oldest first
    pub reviews: Vec<ReviewResponse>,
}

/// Review Index Handler
#[endpoint(
    tags("reviews"),
    summary = "List Product Reviews",
    responses(
        (status_code = StatusCode::OK, description = "Reviews"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = parse_product_id(product.into_inner())?;

    let reviews = state
        .app
        .reviews
        .list_reviews(&product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReviewsResponse {
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}
