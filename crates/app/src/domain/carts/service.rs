//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    cart::{Cart, CartError},
    products::ProductId,
};

use crate::{
    documents::DocumentStore,
    domain::{
        carts::{
            errors::CartsServiceError,
            synchronizer::{CartChange, CartSynchronizer},
        },
        products::ProductsService,
    },
    identity::UserId,
};

/// Account carts backed by the document store, with stock read from the
/// current catalog product.
#[derive(Clone)]
pub struct DocumentCartsService {
    documents: Arc<dyn DocumentStore>,
    products: Arc<dyn ProductsService>,
}

impl DocumentCartsService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, products: Arc<dyn ProductsService>) -> Self {
        Self {
            documents,
            products,
        }
    }

    async fn synchronizer(&self, user: &UserId) -> Result<CartSynchronizer, CartsServiceError> {
        CartSynchronizer::detached(user, self.documents.clone()).await
    }
}

impl std::fmt::Debug for DocumentCartsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCartsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CartsService for DocumentCartsService {
    async fn get_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError> {
        Ok(self.synchronizer(user).await?.cart().clone())
    }

    async fn add_item(
        &self,
        user: &UserId,
        product: &ProductId,
        quantity: u32,
    ) -> Result<CartChange, CartsServiceError> {
        let product = self.products.get_product(product).await?;

        self.synchronizer(user).await?.add(&product, quantity).await
    }

    async fn increase_item(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<CartChange, CartsServiceError> {
        let mut sync = self.synchronizer(user).await?;

        if sync.cart().get(product).is_none() {
            return Err(CartError::NotInCart(product.clone()).into());
        }

        let current = self.products.get_product(product).await?;

        sync.add(&current, 1).await
    }

    async fn decrease_item(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<CartChange, CartsServiceError> {
        self.synchronizer(user).await?.decrease(product).await
    }

    async fn remove_item(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<CartChange, CartsServiceError> {
        self.synchronizer(user).await?.remove(product).await
    }

    async fn clear_cart(&self, user: &UserId) -> Result<CartChange, CartsServiceError> {
        self.synchronizer(user).await?.clear().await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the account cart; a missing cart is empty.
    async fn get_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError>;

    /// Add units of a catalog product.
    async fn add_item(
        &self,
        user: &UserId,
        product: &ProductId,
        quantity: u32,
    ) -> Result<CartChange, CartsServiceError>;

    /// Increase a line by one unit.
    async fn increase_item(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<CartChange, CartsServiceError>;

    /// Decrease a line by one unit, removing it at quantity one.
    async fn decrease_item(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<CartChange, CartsServiceError>;

    /// Remove a line.
    async fn remove_item(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<CartChange, CartsServiceError>;

    /// Empty the cart.
    async fn clear_cart(&self, user: &UserId) -> Result<CartChange, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn add_item_uses_catalog_product() -> TestResult {
        let ctx = TestContext::with_products(&[("ssd", 100_000, 10, Some(5))]).await?;
        let user = UserId::new("u1");

        let change = ctx
            .carts
            .add_item(&user, &ProductId::new("ssd")?, 2)
            .await?;

        assert_eq!(change.cart.subtotal()?, Decimal::from(180_000));
        assert_eq!(ctx.carts.get_cart(&user).await?, change.cart);

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_product_is_not_found() -> TestResult {
        let ctx = TestContext::with_products(&[]).await?;

        let result = ctx
            .carts
            .add_item(&UserId::new("u1"), &ProductId::new("ghost")?, 1)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn increase_checks_current_stock() -> TestResult {
        let ctx = TestContext::with_products(&[("fan", 30_000, 0, Some(5))]).await?;
        let user = UserId::new("u1");
        let fan = ProductId::new("fan")?;

        ctx.carts.add_item(&user, &fan, 1).await?;
        ctx.products.update_stock(&fan, Some(1)).await?;

        let result = ctx.carts.increase_item(&user, &fan).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::Cart(CartError::StockExceeded { stock: 1, .. }))
            ),
            "expected StockExceeded, got {result:?}"
        );
        assert_eq!(ctx.carts.get_cart(&user).await?.quantity_of(&fan), 1);

        Ok(())
    }

    #[tokio::test]
    async fn increase_missing_line_is_rejected() -> TestResult {
        let ctx = TestContext::with_products(&[("fan", 30_000, 0, None)]).await?;

        let result = ctx
            .carts
            .increase_item(&UserId::new("u1"), &ProductId::new("fan")?)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::Cart(CartError::NotInCart(_)))),
            "expected NotInCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn decrease_remove_and_clear() -> TestResult {
        let ctx = TestContext::with_products(&[
            ("fan", 30_000, 0, None),
            ("psu", 400_000, 0, None),
        ])
        .await?;
        let user = UserId::new("u1");
        let fan = ProductId::new("fan")?;
        let psu = ProductId::new("psu")?;

        ctx.carts.add_item(&user, &fan, 2).await?;
        ctx.carts.add_item(&user, &psu, 1).await?;

        let change = ctx.carts.decrease_item(&user, &fan).await?;
        assert_eq!(change.cart.quantity_of(&fan), 1);

        let change = ctx.carts.remove_item(&user, &psu).await?;
        assert_eq!(change.cart.len(), 1);

        let change = ctx.carts.clear_cart(&user).await?;
        assert!(change.cart.is_empty());
        assert!(ctx.carts.get_cart(&user).await?.is_empty());

        Ok(())
    }
}
