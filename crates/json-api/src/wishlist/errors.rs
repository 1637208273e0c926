//! Wishlist Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::wishlists::WishlistsServiceError;

pub(crate) fn into_status_error(error: WishlistsServiceError) -> StatusError {
    match error {
        WishlistsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        WishlistsServiceError::Products(source) => {
            error!("failed to resolve wishlist product: {source}");

            StatusError::internal_server_error()
        }
        WishlistsServiceError::Store(source) => {
            error!("wishlist store error: {source}");

            StatusError::internal_server_error()
        }
    }
}
