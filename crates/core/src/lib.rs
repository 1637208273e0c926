//! Storefront
//!
//! Storefront is the domain core of an online shop: products, exact decimal
//! pricing, cart mutations, checkout outcomes, customer validation and the
//! bot-verification policy. It performs no I/O.

pub mod cart;
pub mod checkout;
pub mod customer;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod verification;

#[cfg(test)]
pub(crate) mod fixtures;
