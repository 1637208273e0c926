//! Payments
//!
//! Transactions are created and settled by the Wompi payment gateway. This
//! module signs and submits them, polls their status, and drives the
//! client-side checkout session.

pub mod errors;
pub mod gateway;
pub mod models;
pub mod service;
pub mod session;

pub use errors::PaymentsServiceError;
pub use gateway::{
    DEFAULT_WOMPI_BASE_URL, GatewayError, GatewayTransaction, NewTransaction, PaymentGateway,
    WompiClient, WompiConfig, integrity_signature,
};
pub use models::{CheckoutRequest, CreatedCheckout};
pub use service::*;
pub use session::{CheckoutConfirmation, CheckoutSession};
