//! Wishlist models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::products::{Product, ProductId};

/// Stored wishlist document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRecord {
    pub product_id: ProductId,
    pub added_at: Timestamp,
}

/// Wishlist entry resolved against the catalog. `product` is `None` when the
/// product has since been removed.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub added_at: Timestamp,
    pub product: Option<Product>,
}

/// Result of toggling a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistToggle {
    Added,
    Removed,
}
