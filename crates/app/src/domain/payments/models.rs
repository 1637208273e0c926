//! Payments models.

use serde::{Deserialize, Serialize};
use storefront::{checkout::TransactionReference, customer::CustomerProfile};

/// Checkout submitted by a shopper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Total in minor currency units
    pub amount_in_cents: i64,

    /// Email the gateway sends the receipt to
    pub customer_email: String,

    /// Contact and identification data
    pub customer_data: CustomerProfile,
}

/// Transaction accepted by the gateway, awaiting payment on its hosted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCheckout {
    pub transaction_id: String,
    pub reference: TransactionReference,
    pub redirect_url: Option<String>,
}
