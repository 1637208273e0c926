//! Product Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use storefront::products::{Product, ProductId};

use crate::extensions::*;

/// Catalog product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// List price in whole pesos
    pub price: u64,

    /// Price after the discount, in whole pesos
    pub discounted_price: String,

    pub image: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,

    /// Discount percentage
    pub discount: u8,

    /// Units sold so far
    pub sales: u64,

    /// Units available; absent when inventory is not tracked
    pub stock: Option<u32>,

    pub coupon: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            discounted_price: product.discounted_price().normalize().to_string(),
            id: product.id.to_string(),
            name: product.name,
            price: product.price,
            image: product.image,
            category: product.category,
            description: product.description,
            discount: product.discount.percent(),
            sales: product.sales,
            stock: product.stock,
            coupon: product.coupon,
        }
    }
}

/// Parse a product id taken from the path.
pub(crate) fn parse_product_id(raw: String) -> Result<ProductId, StatusError> {
    ProductId::new(raw).or_400("Invalid product id")
}
