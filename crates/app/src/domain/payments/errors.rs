//! Payments service errors.

use storefront::{customer::CustomerError, pricing::PricingError};
use thiserror::Error;

use crate::{
    domain::{carts::CartsServiceError, payments::gateway::GatewayError},
    local_storage::LocalStorageError,
};

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("customer email is not valid")]
    InvalidEmail,

    #[error("invalid customer data")]
    InvalidCustomer(#[from] CustomerError),

    #[error("transaction id is required")]
    MissingTransactionId,

    #[error("cart is empty")]
    EmptyCart,

    #[error("no transaction is awaiting confirmation")]
    NoPendingTransaction,

    #[error("cart total could not be computed")]
    Pricing(#[from] PricingError),

    #[error("payment gateway error")]
    Gateway(#[from] GatewayError),

    #[error("cart error")]
    Cart(#[from] CartsServiceError),

    #[error("local storage error")]
    LocalStorage(#[from] LocalStorageError),
}
