//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::products::{Product, ProductId};
use tracing::{info, warn};

use crate::{
    documents::{self, CollectionPath, DocumentPath, DocumentStore, DocumentStoreError},
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, ProductQuery},
    },
};

const PRODUCTS_COLLECTION: &str = "products";

pub(crate) fn products_collection() -> Result<CollectionPath, DocumentStoreError> {
    CollectionPath::root(PRODUCTS_COLLECTION)
}

pub(crate) fn product_path(product: &ProductId) -> Result<DocumentPath, DocumentStoreError> {
    products_collection()?.doc(product.as_str())
}

#[derive(Clone)]
pub struct DocumentProductsService {
    documents: Arc<dyn DocumentStore>,
}

impl DocumentProductsService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    async fn all_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let documents = self.documents.list(&products_collection()?).await?;

        Ok(documents
            .iter()
            .filter_map(|document| match document.decode::<Product>() {
                Ok(product) => Some(product),
                Err(error) => {
                    warn!(product = %document.id, %error, "skipping unreadable product");

                    None
                }
            })
            .collect())
    }
}

impl std::fmt::Debug for DocumentProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProductsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductsService for DocumentProductsService {
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let products = self.all_products().await?;

        Ok(query.apply(products))
    }

    async fn get_product(&self, product: &ProductId) -> Result<Product, ProductsServiceError> {
        documents::read(self.documents.as_ref(), &product_path(product)?)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let id = ProductId::new(documents::generate_id())?;
        let product = product.into_product(id)?;

        documents::write(self.documents.as_ref(), &product_path(&product.id)?, &product).await?;

        info!(product = %product.id, name = %product.name, "created product");

        Ok(product)
    }

    async fn delete_product(&self, product: &ProductId) -> Result<(), ProductsServiceError> {
        if !self.documents.delete(&product_path(product)?).await? {
            return Err(ProductsServiceError::NotFound);
        }

        info!(%product, "deleted product");

        Ok(())
    }

    async fn update_stock(
        &self,
        product: &ProductId,
        stock: Option<u32>,
    ) -> Result<Product, ProductsServiceError> {
        let mut current = self.get_product(product).await?;

        current.stock = stock;

        documents::write(self.documents.as_ref(), &product_path(product)?, &current).await?;

        info!(%product, ?stock, "updated product stock");

        Ok(current)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List catalog products matching `query`.
    async fn list_products(&self, query: ProductQuery)
    -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: &ProductId) -> Result<Product, ProductsServiceError>;

    /// Create a product with a generated id.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Delete a product.
    async fn delete_product(&self, product: &ProductId) -> Result<(), ProductsServiceError>;

    /// Replace the recorded stock; `None` stops tracking inventory.
    async fn update_stock(
        &self,
        product: &ProductId,
        stock: Option<u32>,
    ) -> Result<Product, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::seeded_catalog;

    use super::*;

    fn new_product(name: &str, price: u64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            image: None,
            category: Some("Storage".to_string()),
            description: None,
            discount: 0,
            sales: 0,
            stock: Some(3),
            coupon: None,
        }
    }

    #[tokio::test]
    async fn create_product_persists_and_returns_it() -> TestResult {
        let (service, _) = seeded_catalog(&[]).await?;

        let created = service.create_product(new_product("SSD 1TB", 250_000)).await?;
        let fetched = service.get_product(&created.id).await?;

        assert_eq!(fetched, created);
        assert_eq!(fetched.sales, 0);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_blank_name() -> TestResult {
        let (service, _) = seeded_catalog(&[]).await?;

        let result = service.create_product(new_product("  ", 250_000)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_discount_above_one_hundred() -> TestResult {
        let (service, _) = seeded_catalog(&[]).await?;

        let mut product = new_product("SSD", 250_000);
        product.discount = 120;

        let result = service.create_product(product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidValue(_))),
            "expected InvalidValue, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_product_returns_not_found() -> TestResult {
        let (service, _) = seeded_catalog(&[]).await?;

        let result = service.get_product(&ProductId::new("missing")?).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_then_delete_again_is_not_found() -> TestResult {
        let (service, products) = seeded_catalog(&[("fan", 30_000, 0, None)]).await?;
        let fan = products.first().ok_or("seeded product")?;

        service.delete_product(&fan.id).await?;

        let result = service.delete_product(&fan.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_stock_replaces_recorded_stock() -> TestResult {
        let (service, products) = seeded_catalog(&[("fan", 30_000, 0, Some(1))]).await?;
        let fan = products.first().ok_or("seeded product")?;

        let updated = service.update_stock(&fan.id, Some(12)).await?;

        assert_eq!(updated.stock, Some(12));
        assert_eq!(service.get_product(&fan.id).await?.stock, Some(12));

        Ok(())
    }

    #[tokio::test]
    async fn offers_only_include_discounted_products() -> TestResult {
        let (service, _) = seeded_catalog(&[
            ("fan", 30_000, 0, None),
            ("psu", 400_000, 15, None),
        ])
        .await?;

        let offers = service.list_products(ProductQuery::Offers).await?;
        let ids: Vec<&str> = offers.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["psu"]);

        Ok(())
    }

    #[tokio::test]
    async fn top_selling_orders_by_sales() -> TestResult {
        let (service, mut products) = seeded_catalog(&[
            ("a", 10_000, 0, None),
            ("b", 10_000, 0, None),
            ("c", 10_000, 0, None),
        ])
        .await?;

        for (product, sales) in products.iter_mut().zip([5, 50, 20]) {
            product.sales = sales;
            documents::write(service.documents.as_ref(), &product_path(&product.id)?, &*product)
                .await?;
        }

        let top = service.list_products(ProductQuery::TopSelling(2)).await?;
        let ids: Vec<&str> = top.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "c"]);

        Ok(())
    }

    #[tokio::test]
    async fn created_sales_rank_best_sellers() -> TestResult {
        let (service, _) = seeded_catalog(&[]).await?;

        for (name, sales) in [("Fan", 3), ("SSD", 40), ("PSU", 12)] {
            let mut product = new_product(name, 100_000);
            product.sales = sales;

            service.create_product(product).await?;
        }

        let top = service.list_products(ProductQuery::TopSelling(3)).await?;
        let ranked: Vec<(&str, u64)> = top.iter().map(|p| (p.name.as_str(), p.sales)).collect();

        assert_eq!(ranked, vec![("SSD", 40), ("PSU", 12), ("Fan", 3)]);

        Ok(())
    }

    #[test]
    fn new_product_sales_default_to_zero() -> TestResult {
        let product: NewProduct = serde_json::from_str(r#"{"name":"SSD","price":250000}"#)?;

        assert_eq!(product.into_product(ProductId::new("ssd")?)?.sales, 0);

        Ok(())
    }

    #[tokio::test]
    async fn unreadable_products_are_skipped_in_listings() -> TestResult {
        let (service, _) = seeded_catalog(&[("fan", 30_000, 0, None)]).await?;

        service
            .documents
            .set(
                &products_collection()?.doc("broken")?,
                serde_json::json!({ "name": 7 }),
            )
            .await?;

        let listed = service.list_products(ProductQuery::All).await?;
        let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["fan"]);

        Ok(())
    }

    #[tokio::test]
    async fn suggestions_are_capped() -> TestResult {
        let seeds: Vec<(&str, u64, u8, Option<u32>)> = ["p1", "p2", "p3", "p4", "p5", "p6"]
            .into_iter()
            .map(|id| (id, 10_000, 0, None))
            .collect();

        let (service, _) = seeded_catalog(&seeds).await?;

        let suggestions = service
            .list_products(ProductQuery::Suggest("product".to_string()))
            .await?;

        assert_eq!(suggestions.len(), 5);

        Ok(())
    }
}
