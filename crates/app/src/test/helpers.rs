//! Test Helpers

use std::sync::Arc;

use storefront::products::{Discount, Product, ProductError, ProductId};
use testresult::TestResult;

use crate::{
    documents::{self, DocumentStore, MemoryDocumentStore},
    domain::products::{DocumentProductsService, service::product_path},
    identity::{AuthenticatedUser, UserId},
};

/// Seed row: id, price, discount percentage, stock.
pub(crate) type ProductSeed<'a> = (&'a str, u64, u8, Option<u32>);

/// Build a catalog product named after its identifier.
pub(crate) fn catalog_product(
    id: &str,
    price: u64,
    discount: u8,
    stock: Option<u32>,
) -> Result<Product, ProductError> {
    Ok(Product {
        id: ProductId::new(id)?,
        name: format!("Product {id}"),
        price,
        image: None,
        category: None,
        description: None,
        discount: Discount::new(discount)?,
        sales: 0,
        stock,
        coupon: None,
    })
}

/// Write seed products into `documents` under their own ids.
pub(crate) async fn seed_products(
    documents: &dyn DocumentStore,
    seeds: &[ProductSeed<'_>],
) -> TestResult<Vec<Product>> {
    let mut products = Vec::with_capacity(seeds.len());

    for &(id, price, discount, stock) in seeds {
        let product = catalog_product(id, price, discount, stock)?;

        documents::write(documents, &product_path(&product.id)?, &product).await?;

        products.push(product);
    }

    Ok(products)
}

/// Products service over a fresh in-memory store holding `seeds`.
pub(crate) async fn seeded_catalog(
    seeds: &[ProductSeed<'_>],
) -> TestResult<(DocumentProductsService, Vec<Product>)> {
    let documents = Arc::new(MemoryDocumentStore::new());
    let products = seed_products(documents.as_ref(), seeds).await?;

    Ok((DocumentProductsService::new(documents), products))
}

/// Signed-in customer with a predictable email.
pub(crate) fn customer(uid: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        uid: UserId::new(uid),
        email: format!("{uid}@example.com"),
    }
}
