//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    cart::{CartChangeResponse, into_status_error},
    extensions::*,
    products::parse_product_id,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removes the whole line regardless of its quantity.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Product is not in the cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartChangeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?;
    let product = parse_product_id(product.into_inner())?;

    let change = state
        .app
        .carts
        .remove_item(&user.uid, &product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartChangeResponse::from_change(&change)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront::cart::{Cart, CartNotice};
    use storefront_app::domain::carts::CartChange;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_UID, service, test_user};

    use super::*;

    #[tokio::test]
    async fn test_remove_item_drops_line() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_remove_item()
            .once()
            .withf(|user, product| user.as_str() == TEST_UID && product.as_str() == "ssd")
            .return_once(|_, product| {
                Ok(CartChange {
                    cart: Cart::new(),
                    notice: CartNotice::Removed {
                        product_id: product.clone(),
                        name: "Product ssd".to_string(),
                    },
                })
            });

        let response: CartChangeResponse = TestClient::delete("http://example.com/cart/items/ssd")
            .send(&service(
                mocks,
                test_user(),
                Router::with_path("cart/items/{product}").delete(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.notice.message, "Product ssd removed from cart");

        Ok(())
    }
}
