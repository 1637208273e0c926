//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::EmptyComment => {
            StatusError::bad_request().brief("Review comment cannot be empty")
        }
        ReviewsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        ReviewsServiceError::Products(source) => {
            error!("failed to resolve reviewed product: {source}");

            StatusError::internal_server_error()
        }
        ReviewsServiceError::Store(source) => {
            error!("review store error: {source}");

            StatusError::internal_server_error()
        }
    }
}
