//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem, CartNotice},
    checkout::{CheckoutOutcome, TransactionReference, TransactionStatus},
    customer::{CustomerError, CustomerProfile, LegalIdType, is_valid_email},
    pricing::{PricingError, STORE_CURRENCY, format_price},
    products::{Discount, Product, ProductError, ProductId},
    verification::{RejectionReason, SiteVerification, TRUST_SCORE_THRESHOLD, Verdict, assess},
};
