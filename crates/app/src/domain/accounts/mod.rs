//! Accounts
//!
//! Registration and sign-in guarded by bot verification, and the welcome
//! email sent to new customers.

pub mod errors;
pub mod mailer;
pub mod service;

pub use errors::AccountsServiceError;
pub use mailer::{LogMailer, Mailer, MailerError, WelcomeEmail};
pub use service::*;
