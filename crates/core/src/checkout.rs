//! Checkout
//!
//! Transaction references and the mapping from payment gateway statuses to
//! what the shopper is told and whether the cart is emptied.

use std::fmt;

use jiff::Timestamp;
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};

pub use crate::pricing::STORE_CURRENCY;

const REFERENCE_PREFIX: &str = "REF_";
const REFERENCE_SUFFIX_LEN: usize = 8;

/// Reference identifying one checkout attempt to the payment gateway.
///
/// Built from the current time in milliseconds and a random alphanumeric
/// suffix. Two checkouts submitted in the same millisecond still differ by
/// their suffix, but collisions are not ruled out and duplicate submissions
/// produce distinct references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionReference(String);

impl TransactionReference {
    /// Generate a reference for the given instant.
    pub fn generate<R: Rng + ?Sized>(millis: i64, rng: &mut R) -> Self {
        let suffix: String = (0..REFERENCE_SUFFIX_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();

        Self(format!("{REFERENCE_PREFIX}{millis}_{suffix}"))
    }

    /// Generate a reference for the current time using the thread RNG.
    #[must_use]
    pub fn now() -> Self {
        Self::generate(Timestamp::now().as_millisecond(), &mut rand::thread_rng())
    }

    /// Borrow the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TransactionReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction status reported by the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// Payment captured.
    Approved,

    /// Payment refused.
    Declined,

    /// Gateway has not settled the payment yet.
    Pending,

    /// Any other status string, kept verbatim.
    Unrecognized(String),
}

impl TransactionStatus {
    /// Parse a gateway status string. Matching is exact.
    #[must_use]
    pub fn parse(status: &str) -> Self {
        match status {
            "APPROVED" => Self::Approved,
            "DECLINED" => Self::Declined,
            "PENDING" => Self::Pending,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Gateway representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
            Self::Pending => "PENDING",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Map the status to the checkout outcome shown to the shopper.
    #[must_use]
    pub fn outcome(&self) -> CheckoutOutcome {
        match self {
            Self::Approved => CheckoutOutcome::Succeeded,
            Self::Declined => CheckoutOutcome::RetryRequired,
            Self::Pending => CheckoutOutcome::AwaitingConfirmation,
            Self::Unrecognized(raw) => CheckoutOutcome::Failed {
                status: raw.clone(),
            },
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<TransactionStatus> for String {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// What the shopper sees after a status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Approved: the cart is emptied.
    Succeeded,

    /// Declined: the cart is kept so the shopper can try again.
    RetryRequired,

    /// Pending: the cart is kept until the gateway settles.
    AwaitingConfirmation,

    /// Unknown status, shown to the shopper as an error.
    Failed {
        /// Raw gateway status
        status: String,
    },
}

impl CheckoutOutcome {
    /// Whether this outcome empties the cart.
    #[must_use]
    pub const fn clears_cart(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Message shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Succeeded => "Payment approved. Thank you for your purchase!".to_string(),
            Self::RetryRequired => "Payment was declined. Please try again.".to_string(),
            Self::AwaitingConfirmation => {
                "Payment is pending. We will confirm it as soon as possible.".to_string()
            }
            Self::Failed { status } => format!("Unexpected payment status: {status}"),
        }
    }
}
