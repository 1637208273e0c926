//! Products service errors.

use storefront::products::ProductError;
use thiserror::Error;

use crate::documents::DocumentStoreError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("invalid product data: {0}")]
    InvalidData(&'static str),

    #[error("invalid product value")]
    InvalidValue(#[from] ProductError),

    #[error("document store error")]
    Store(#[from] DocumentStoreError),
}
