//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::domain::products::models::ProductQuery;

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Matching products
    pub products: Vec<ProductResponse>,
}

/// Pick the single listing filter from the query string.
fn product_query(
    category: Option<String>,
    search: Option<String>,
    suggest: Option<String>,
    offers: Option<bool>,
    top_selling: Option<usize>,
) -> Result<ProductQuery, StatusError> {
    let mut filters = Vec::with_capacity(1);

    if let Some(category) = category {
        filters.push(ProductQuery::Category(category));
    }

    if let Some(search) = search {
        filters.push(ProductQuery::Search(search));
    }

    if let Some(prefix) = suggest {
        filters.push(ProductQuery::Suggest(prefix));
    }

    if offers == Some(true) {
        filters.push(ProductQuery::Offers);
    }

    if let Some(limit) = top_selling {
        filters.push(ProductQuery::TopSelling(limit));
    }

    match filters.len() {
        0 => Ok(ProductQuery::All),
        1 => Ok(filters.remove(0)),
        _ => Err(StatusError::bad_request().brief("Use at most one product filter")),
    }
}

/// Product Index Handler
///
/// Lists the catalog, optionally filtered by category, keyword search,
/// name suggestions, active offers or best sellers.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Conflicting filters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    suggest: QueryParam<String, false>,
    offers: QueryParam<bool, false>,
    top_selling: QueryParam<usize, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = product_query(
        category.into_inner(),
        search.into_inner(),
        suggest.into_inner(),
        offers.into_inner(),
        top_selling.into_inner(),
    )?;

    let products = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
