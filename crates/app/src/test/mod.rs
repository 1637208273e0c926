//! Shared fixtures for service tests.

mod context;
mod helpers;

pub(crate) use context::TestContext;
pub(crate) use helpers::{catalog_product, customer, seeded_catalog};
