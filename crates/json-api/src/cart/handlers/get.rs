//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{CartResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the signed-in customer's cart. A customer without a cart gets an
/// empty one.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(&user.uid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::from_cart(&cart)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront::cart::Cart;
    use storefront_app::domain::carts::CartsServiceError;
    use testresult::TestResult;

    use crate::{
        cart::models::tests::make_cart,
        test_helpers::{Mocks, TEST_UID, service, store_error, test_user},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, test_user(), Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_returns_totals() -> TestResult {
        let cart = make_cart("ssd", 2)?;

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .withf(|user| user.as_str() == TEST_UID)
            .return_once(move |_| Ok(cart));

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.items.len(), 1, "expected one line");
        assert_eq!(response.subtotal, "200000");
        assert_eq!(response.total_in_cents, 20_000_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_cart_is_empty() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .return_once(|_| Ok(Cart::new()));

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert!(response.items.is_empty());
        assert_eq!(response.total_in_cents, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_store_error_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::Store(store_error())));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
