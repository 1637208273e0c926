//! Reviews service errors.

use thiserror::Error;

use crate::{documents::DocumentStoreError, domain::products::ProductsServiceError};

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("review comment cannot be empty")]
    EmptyComment,

    #[error("product not found")]
    ProductNotFound,

    #[error("products error")]
    Products(#[source] ProductsServiceError),

    #[error("document store error")]
    Store(#[from] DocumentStoreError),
}

impl From<ProductsServiceError> for ReviewsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            other => Self::Products(other),
        }
    }
}
