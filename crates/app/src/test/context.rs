//! Test context for service-level tests.

use std::sync::Arc;

use testresult::TestResult;

use crate::{
    documents::{DocumentStore, MemoryDocumentStore},
    domain::{
        carts::DocumentCartsService, products::DocumentProductsService,
        reviews::DocumentReviewsService, wishlists::DocumentWishlistsService,
    },
};

use super::helpers::{ProductSeed, seed_products};

/// Catalog, review, wishlist and cart services sharing one in-memory store.
pub(crate) struct TestContext {
    pub documents: Arc<MemoryDocumentStore>,
    pub products: Arc<DocumentProductsService>,
    pub reviews: DocumentReviewsService,
    pub wishlists: DocumentWishlistsService,
    pub carts: DocumentCartsService,
}

impl TestContext {
    pub(crate) async fn with_products(seeds: &[ProductSeed<'_>]) -> TestResult<Self> {
        let documents = Arc::new(MemoryDocumentStore::new());

        seed_products(documents.as_ref(), seeds).await?;

        let store: Arc<dyn DocumentStore> = documents.clone();
        let products = Arc::new(DocumentProductsService::new(store.clone()));

        Ok(Self {
            reviews: DocumentReviewsService::new(store.clone(), products.clone()),
            wishlists: DocumentWishlistsService::new(store.clone(), products.clone()),
            carts: DocumentCartsService::new(store, products.clone()),
            products,
            documents,
        })
    }
}
