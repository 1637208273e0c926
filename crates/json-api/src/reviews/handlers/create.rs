//! Create Review Handler

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
    products::parse_product_id,
    reviews::{ReviewResponse, into_status_error},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    pub comment: String,
}

/// Create Review Handler
///
/// Posts a review as the signed-in customer.
#[endpoint(
    tags("reviews"),
    summary = "Add Product Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty comment"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let author = depot.identity_or_401()?;
    let product = parse_product_id(product.into_inner())?;

    let review = state
        .app
        .reviews
        .add_review(&product, author, &json.into_inner().comment)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}
