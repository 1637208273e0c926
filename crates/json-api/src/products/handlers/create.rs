//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::domain::products::models::NewProduct;

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,

    /// List price in whole pesos
    pub price: u64,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Discount percentage, 0 to 100
    #[serde(default)]
    pub discount: u8,

    /// Units sold so far, used to rank best sellers
    #[serde(default)]
    pub sales: u64,

    /// Units available; omit to leave inventory untracked
    #[serde(default)]
    pub stock: Option<u32>,

    #[serde(default)]
    pub coupon: Option<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            name: request.name,
            price: request.price,
            image: request.image,
            category: request.category,
            description: request.description,
            discount: request.discount,
            sales: request.sales,
            stock: request.stock,
            coupon: request.coupon,
        }
    }
}

/// Create Product Handler
///
/// Admin only. The product id is generated by the store.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::domain::products::ProductsServiceError;
    use testresult::TestResult;

    use crate::{
        auth::admin_guard,
        test_helpers::{Mocks, make_product, service, test_admin, test_user},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("products").hoop(admin_guard).post(handler)
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let product = make_product("generated-id", 250_000)?;

        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_create_product()
            .once()
            .withf(|new| {
                new.name == "SSD 1TB" && new.price == 250_000 && new.discount == 10 && new.sales == 0
            })
            .return_once(move |_| Ok(product));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "SSD 1TB", "price": 250_000, "discount": 10, "stock": 5 }))
            .send(&service(mocks, test_admin(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let location = res
            .headers()
            .get(LOCATION)
            .ok_or("missing location header")?
            .to_str()?;

        assert_eq!(location, "/products/generated-id");

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.id, "generated-id");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_forwards_sales() -> TestResult {
        let product = make_product("generated-id", 250_000)?;

        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_create_product()
            .once()
            .withf(|new| new.sales == 40)
            .return_once(move |_| Ok(product));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "SSD 1TB", "price": 250_000, "sales": 40 }))
            .send(&service(mocks, test_admin(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_invalid_data() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidData("price must be positive")));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "SSD 1TB", "price": 0 }))
            .send(&service(mocks, test_admin(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_requires_admin() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "SSD 1TB", "price": 250_000 }))
            .send(&service(mocks, test_user(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
