//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    cart::{CartChangeResponse, into_status_error},
    extensions::*,
    products::parse_product_id,
    state::State,
};

fn one() -> u32 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_id: String,

    /// Units to add, defaults to one
    #[serde(default = "one")]
    pub quantity: u32,
}

/// Add Cart Item Handler
///
/// Adds units of a catalog product. The cart is left unchanged when stock
/// would be exceeded.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartChangeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?;
    let request = json.into_inner();
    let product = parse_product_id(request.product_id)?;

    let change = state
        .app
        .carts
        .add_item(&user.uid, &product, request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartChangeResponse::from_change(&change)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::{
        cart::{CartError, CartNotice},
        products::ProductId,
    };
    use storefront_app::domain::carts::{CartChange, CartsServiceError};
    use testresult::TestResult;

    use crate::{
        cart::models::tests::make_cart,
        test_helpers::{Mocks, TEST_UID, service, test_user},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, test_user(), Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_defaults_to_one_unit() -> TestResult {
        let cart = make_cart("ssd", 1)?;
        let product_id = ProductId::new("ssd")?;

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .withf(|user, product, quantity| {
                user.as_str() == TEST_UID && product.as_str() == "ssd" && *quantity == 1
            })
            .return_once(move |_, _, _| {
                Ok(CartChange {
                    cart,
                    notice: CartNotice::Added {
                        product_id,
                        name: "Product ssd".to_string(),
                        quantity: 1,
                    },
                })
            });

        let response: CartChangeResponse = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_id": "ssd" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.notice.kind, "added");
        assert_eq!(response.notice.message, "Product ssd added to cart");
        assert_eq!(response.cart.items.len(), 1, "expected one line");

        Ok(())
    }

    #[tokio::test]
    async fn test_stock_exceeded_is_conflict() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_add_item().once().return_once(|_, product, _| {
            Err(CartsServiceError::Cart(CartError::StockExceeded {
                product_id: product.clone(),
                name: "SSD 1TB".to_string(),
                stock: 5,
            }))
        });

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_id": "ssd", "quantity": 6 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_is_bad_request() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::Cart(CartError::InvalidQuantity)));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_id": "ssd", "quantity": 0 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
