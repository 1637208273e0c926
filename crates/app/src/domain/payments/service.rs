//! Payments service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    checkout::{STORE_CURRENCY, TransactionReference, TransactionStatus},
    customer::is_valid_email,
};
use tracing::info;

use crate::domain::payments::{
    errors::PaymentsServiceError,
    gateway::{NewTransaction, PaymentGateway},
    models::{CheckoutRequest, CreatedCheckout},
};

#[derive(Clone)]
pub struct GatewayPaymentsService {
    gateway: Arc<dyn PaymentGateway>,
}

impl GatewayPaymentsService {
    #[must_use]
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }
}

impl std::fmt::Debug for GatewayPaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayPaymentsService")
            .finish_non_exhaustive()
    }
}

fn validate(request: &CheckoutRequest) -> Result<(), PaymentsServiceError> {
    if request.amount_in_cents <= 0 {
        return Err(PaymentsServiceError::InvalidAmount);
    }

    if !is_valid_email(&request.customer_email) {
        return Err(PaymentsServiceError::InvalidEmail);
    }

    request.customer_data.validate()?;

    Ok(())
}

#[async_trait]
impl PaymentsService for GatewayPaymentsService {
    async fn create_transaction(
        &self,
        request: CheckoutRequest,
    ) -> Result<CreatedCheckout, PaymentsServiceError> {
        validate(&request)?;

        let mut customer = request.customer_data;
        customer.email = request.customer_email.trim().to_string();

        let transaction = NewTransaction {
            reference: TransactionReference::now(),
            amount_in_cents: request.amount_in_cents,
            currency: STORE_CURRENCY.iso_alpha_code,
            customer,
        };

        let created = self.gateway.create_transaction(&transaction).await?;

        info!(
            transaction = %created.id,
            amount_in_cents = transaction.amount_in_cents,
            "checkout started"
        );

        Ok(CreatedCheckout {
            transaction_id: created.id,
            reference: transaction.reference,
            redirect_url: created.redirect_url,
        })
    }

    async fn check_status(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionStatus, PaymentsServiceError> {
        let transaction_id = transaction_id.trim();

        if transaction_id.is_empty() {
            return Err(PaymentsServiceError::MissingTransactionId);
        }

        let transaction = self.gateway.transaction_status(transaction_id).await?;

        info!(
            transaction = %transaction_id,
            status = %transaction.status,
            "checked transaction status"
        );

        Ok(transaction.status)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Validate a checkout and open a transaction for it at the gateway.
    async fn create_transaction(
        &self,
        request: CheckoutRequest,
    ) -> Result<CreatedCheckout, PaymentsServiceError>;

    /// Poll the gateway for a transaction's status.
    async fn check_status(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionStatus, PaymentsServiceError>;
}
