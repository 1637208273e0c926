//! Callable Handlers

use storefront_app::domain::accounts::AccountsServiceError;

use crate::observability::observe_verification;

pub(crate) mod check_transaction_status;
pub(crate) mod create_transaction;
pub(crate) mod login_user;
pub(crate) mod register_user;
pub(crate) mod send_welcome_email;
pub(crate) mod verify_recaptcha;

/// Count the bot verification outcome behind an account operation. Input
/// errors stop before verification and are not counted.
fn record_verification<T>(result: &Result<T, AccountsServiceError>) {
    match result {
        Err(
            AccountsServiceError::MissingField(_)
            | AccountsServiceError::InvalidEmail
            | AccountsServiceError::PasswordTooShort { .. },
        ) => {}
        Err(AccountsServiceError::VerificationRejected) => observe_verification("rejected"),
        Err(AccountsServiceError::VerificationUnavailable(_)) => observe_verification("error"),
        Ok(_) | Err(_) => observe_verification("human"),
    }
}
