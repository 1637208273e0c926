//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        ProductsServiceError::InvalidValue(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        ProductsServiceError::Store(source) => {
            error!("product store error: {source}");

            StatusError::internal_server_error()
        }
    }
}
