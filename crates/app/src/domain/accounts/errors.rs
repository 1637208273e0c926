//! Accounts service errors.

use thiserror::Error;

use crate::{
    domain::accounts::mailer::MailerError, identity::IdentityError,
    recaptcha::BotVerificationError,
};

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("bot verification failed")]
    VerificationRejected,

    #[error("bot verification unavailable")]
    VerificationUnavailable(#[source] BotVerificationError),

    #[error("an account already exists for this email")]
    EmailExists,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("identity provider error")]
    Identity(#[source] IdentityError),

    #[error("mail delivery failed")]
    Mail(#[from] MailerError),
}

impl From<IdentityError> for AccountsServiceError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::EmailExists => Self::EmailExists,
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            other => Self::Identity(other),
        }
    }
}

impl From<BotVerificationError> for AccountsServiceError {
    fn from(error: BotVerificationError) -> Self {
        match error {
            BotVerificationError::MissingToken => Self::MissingField("recaptchaToken"),
            other => Self::VerificationUnavailable(other),
        }
    }
}
