//! Checkout session
//!
//! Client side of a checkout: open a transaction for the current cart,
//! remember its id on the device, and after the gateway redirects back,
//! poll its status once and settle the cart.

use std::sync::Arc;

use serde::Serialize;
use storefront::{
    cart::Cart,
    checkout::{CheckoutOutcome, STORE_CURRENCY, TransactionStatus},
    customer::CustomerProfile,
};
use tracing::{info, warn};

use crate::{
    domain::{
        carts::CartSynchronizer,
        payments::{
            errors::PaymentsServiceError,
            models::{CheckoutRequest, CreatedCheckout},
            service::PaymentsService,
        },
    },
    local_storage::{LocalStorage, TRANSACTION_ID_KEY},
};

/// Result of confirming a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfirmation {
    pub transaction_id: String,
    pub status: TransactionStatus,
    #[serde(skip)]
    pub outcome: CheckoutOutcome,
    pub message: String,
}

#[derive(Clone)]
pub struct CheckoutSession {
    payments: Arc<dyn PaymentsService>,
    storage: Arc<dyn LocalStorage>,
}

impl std::fmt::Debug for CheckoutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSession").finish_non_exhaustive()
    }
}

impl CheckoutSession {
    #[must_use]
    pub fn new(payments: Arc<dyn PaymentsService>, storage: Arc<dyn LocalStorage>) -> Self {
        Self { payments, storage }
    }

    /// Open a transaction for `cart` and remember its id on the device.
    ///
    /// Submitting twice opens two transactions with distinct references.
    ///
    /// # Errors
    ///
    /// - [`PaymentsServiceError::EmptyCart`]: nothing to pay for.
    /// - Validation, pricing and gateway errors from the payments service.
    pub async fn begin(
        &self,
        cart: &Cart,
        customer: CustomerProfile,
    ) -> Result<CreatedCheckout, PaymentsServiceError> {
        if cart.is_empty() {
            return Err(PaymentsServiceError::EmptyCart);
        }

        let request = CheckoutRequest {
            amount_in_cents: cart.total_in_minor_units(STORE_CURRENCY)?,
            customer_email: customer.email.clone(),
            customer_data: customer,
        };

        let created = self.payments.create_transaction(request).await?;

        self.storage
            .set_item(TRANSACTION_ID_KEY, &created.transaction_id)
            .await?;

        Ok(created)
    }

    /// Id of the transaction awaiting confirmation, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when device storage cannot be read.
    pub async fn pending_transaction(&self) -> Result<Option<String>, PaymentsServiceError> {
        Ok(self.storage.get_item(TRANSACTION_ID_KEY).await?)
    }

    /// Poll the pending transaction once and settle the cart.
    ///
    /// An approved payment empties the cart and forgets the transaction id,
    /// so confirming again finds nothing pending and cannot clear twice. Any
    /// other status keeps both.
    ///
    /// # Errors
    ///
    /// - [`PaymentsServiceError::NoPendingTransaction`]: no checkout was started on this device.
    /// - Gateway, cart and storage errors.
    pub async fn confirm(
        &self,
        carts: &mut CartSynchronizer,
    ) -> Result<CheckoutConfirmation, PaymentsServiceError> {
        let transaction_id = self
            .pending_transaction()
            .await?
            .ok_or(PaymentsServiceError::NoPendingTransaction)?;

        let status = self.payments.check_status(&transaction_id).await?;
        let outcome = status.outcome();

        if outcome.clears_cart() {
            carts.clear().await?;
            self.storage.remove_item(TRANSACTION_ID_KEY).await?;

            info!(transaction = %transaction_id, "payment approved, cart cleared");
        } else {
            warn!(transaction = %transaction_id, %status, "payment not approved");
        }

        Ok(CheckoutConfirmation {
            transaction_id,
            status,
            message: outcome.message(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use storefront::customer::LegalIdType;
    use testresult::TestResult;

    use crate::{
        documents::MemoryDocumentStore,
        domain::payments::service::MockPaymentsService,
        local_storage::MemoryLocalStorage,
        test::catalog_product,
    };

    use super::*;

    fn customer() -> CustomerProfile {
        CustomerProfile {
            full_name: "Ana Gómez".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "3001234567".to_string(),
            legal_id: "1020304050".to_string(),
            legal_id_type: LegalIdType::Cc,
        }
    }

    async fn guest_cart(storage: Arc<MemoryLocalStorage>) -> TestResult<CartSynchronizer> {
        let mut sync =
            CartSynchronizer::mount(None, storage, Arc::new(MemoryDocumentStore::new())).await?;
        sync.add(&catalog_product("ssd", 100_000, 10, Some(5))?, 2)
            .await?;

        Ok(sync)
    }

    fn created() -> CreatedCheckout {
        CreatedCheckout {
            transaction_id: "12-abc".to_string(),
            reference: "REF_1_abcdefgh".to_string().into(),
            redirect_url: None,
        }
    }

    #[tokio::test]
    async fn begin_charges_cart_total_and_stores_id() -> TestResult {
        let storage = Arc::new(MemoryLocalStorage::new());
        let sync = guest_cart(storage.clone()).await?;

        let mut payments = MockPaymentsService::new();
        payments
            .expect_create_transaction()
            .withf(|request| {
                request.amount_in_cents == 18_000_000
                    && request.customer_email == "ana@example.com"
            })
            .once()
            .returning(|_| Ok(created()));

        let session = CheckoutSession::new(Arc::new(payments), storage.clone());

        session.begin(sync.cart(), customer()).await?;

        assert_eq!(
            session.pending_transaction().await?.as_deref(),
            Some("12-abc")
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_cannot_check_out() {
        let mut payments = MockPaymentsService::new();
        payments.expect_create_transaction().never();

        let session =
            CheckoutSession::new(Arc::new(payments), Arc::new(MemoryLocalStorage::new()));

        let result = session.begin(&Cart::new(), customer()).await;

        assert!(
            matches!(result, Err(PaymentsServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn declined_payment_keeps_cart() -> TestResult {
        let storage = Arc::new(MemoryLocalStorage::new());
        let mut sync = guest_cart(storage.clone()).await?;
        storage.set_item(TRANSACTION_ID_KEY, "12-abc").await?;

        let mut payments = MockPaymentsService::new();
        payments
            .expect_check_status()
            .once()
            .returning(|_| Ok(TransactionStatus::Declined));

        let session = CheckoutSession::new(Arc::new(payments), storage.clone());
        let confirmation = session.confirm(&mut sync).await?;

        assert_eq!(confirmation.outcome, CheckoutOutcome::RetryRequired);
        assert!(!sync.cart().is_empty());
        assert!(session.pending_transaction().await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn approved_payment_clears_cart_exactly_once() -> TestResult {
        let storage = Arc::new(MemoryLocalStorage::new());
        let mut sync = guest_cart(storage.clone()).await?;
        storage.set_item(TRANSACTION_ID_KEY, "12-abc").await?;

        let mut payments = MockPaymentsService::new();
        payments
            .expect_check_status()
            .withf(|id| id == "12-abc")
            .once()
            .returning(|_| Ok(TransactionStatus::Approved));

        let session = CheckoutSession::new(Arc::new(payments), storage.clone());
        let confirmation = session.confirm(&mut sync).await?;

        assert_eq!(confirmation.outcome, CheckoutOutcome::Succeeded);
        assert!(sync.cart().is_empty());

        let again = session.confirm(&mut sync).await;
        assert!(
            matches!(again, Err(PaymentsServiceError::NoPendingTransaction)),
            "expected NoPendingTransaction, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unrecognized_status_is_reported_verbatim() -> TestResult {
        let storage = Arc::new(MemoryLocalStorage::new());
        let mut sync = guest_cart(storage.clone()).await?;
        storage.set_item(TRANSACTION_ID_KEY, "12-abc").await?;

        let mut payments = MockPaymentsService::new();
        payments
            .expect_check_status()
            .once()
            .returning(|_| Ok(TransactionStatus::parse("VOIDED")));

        let confirmation = CheckoutSession::new(Arc::new(payments), storage)
            .confirm(&mut sync)
            .await?;

        assert_eq!(confirmation.message, "Unexpected payment status: VOIDED");
        assert_eq!(sync.cart().len(), 1);

        Ok(())
    }
}
