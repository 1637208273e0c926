//! Carts service errors.

use storefront::cart::CartError;
use thiserror::Error;

use crate::{
    documents::DocumentStoreError, domain::products::ProductsServiceError,
    local_storage::LocalStorageError,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("product not found")]
    ProductNotFound,

    #[error("products error")]
    Products(#[source] ProductsServiceError),

    #[error("cart has no remote subscription")]
    NotSubscribed,

    #[error("remote cart subscription closed")]
    SubscriptionClosed,

    #[error("cart could not be encoded")]
    Encode(#[source] serde_json::Error),

    #[error("document store error")]
    Store(#[from] DocumentStoreError),

    #[error("local storage error")]
    LocalStorage(#[from] LocalStorageError),
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            other => Self::Products(other),
        }
    }
}
