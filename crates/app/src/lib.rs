//! Storefront application services, persistence adapters and outbound clients.

pub mod context;
pub mod database;
pub mod documents;
pub mod domain;
pub mod identity;
pub mod local_storage;
pub mod recaptcha;

#[cfg(test)]
mod test;
