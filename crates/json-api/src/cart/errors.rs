//! Cart Errors

use salvo::http::StatusError;
use storefront::cart::CartError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Cart(CartError::StockExceeded { name, stock, .. }) => {
            StatusError::conflict().brief(format!("Only {stock} units of {name} are available"))
        }
        CartsServiceError::Cart(CartError::NotInCart(_)) => {
            StatusError::not_found().brief("Product is not in the cart")
        }
        CartsServiceError::Cart(CartError::InvalidQuantity) => {
            StatusError::bad_request()
                .brief(format!("Quantity must be between 1 and {}", u32::MAX))
        }
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        other => {
            error!("cart operation failed: {other}");

            StatusError::internal_server_error()
        }
    }
}
