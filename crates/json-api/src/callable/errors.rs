//! Callable error envelope.
//!
//! Failures render as `{"error": {"status", "message", "details"}}` with a
//! status code string and the matching HTTP status. Upstream diagnostics are
//! logged here and never reach the client.

use salvo::{
    Scribe,
    http::StatusCode,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::{Json, Response},
};
use serde::{Deserialize, Serialize};
use storefront_app::domain::{accounts::AccountsServiceError, payments::PaymentsServiceError};
use tracing::error;

/// Callable error status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum CallableStatus {
    InvalidArgument,
    Unauthenticated,
    PermissionDenied,
    AlreadyExists,
    FailedPrecondition,
    Internal,
}

impl CallableStatus {
    pub(crate) fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::FailedPrecondition => StatusCode::PRECONDITION_FAILED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Error status code
    pub status: CallableStatus,

    /// Human-readable message
    pub message: String,

    /// Offending fields, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Error envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug)]
pub(crate) struct CallableError {
    status: CallableStatus,
    message: String,
    details: Option<Vec<String>>,
}

impl CallableError {
    pub(crate) fn new(status: CallableStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(CallableStatus::InvalidArgument, message)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(CallableStatus::Internal, message)
    }

    #[must_use]
    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.get_or_insert_with(Vec::new).push(detail.into());
        self
    }
}

impl Scribe for CallableError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status.status_code());
        res.render(Json(ErrorEnvelope {
            error: ErrorBody {
                status: self.status,
                message: self.message,
                details: self.details,
            },
        }));
    }
}

impl EndpointOutRegister for CallableError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (CallableStatus::InvalidArgument, "Invalid argument"),
            (CallableStatus::Unauthenticated, "Unauthenticated"),
            (CallableStatus::PermissionDenied, "Permission denied"),
            (CallableStatus::AlreadyExists, "Already exists"),
            (CallableStatus::FailedPrecondition, "Failed precondition"),
            (CallableStatus::Internal, "Internal error"),
        ] {
            operation.responses.insert(
                status.status_code().as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", ErrorEnvelope::to_schema(components)),
            );
        }
    }
}

impl From<AccountsServiceError> for CallableError {
    fn from(error: AccountsServiceError) -> Self {
        match error {
            AccountsServiceError::MissingField(field) => {
                Self::invalid_argument("Missing required data").with_detail(field)
            }
            AccountsServiceError::InvalidEmail | AccountsServiceError::PasswordTooShort { .. } => {
                Self::invalid_argument(error.to_string())
            }
            AccountsServiceError::VerificationRejected => Self::new(
                CallableStatus::PermissionDenied,
                "reCAPTCHA verification failed",
            ),
            AccountsServiceError::VerificationUnavailable(source) => {
                error!("bot verification unavailable: {source}");

                Self::internal("Could not verify reCAPTCHA")
            }
            AccountsServiceError::EmailExists => Self::new(
                CallableStatus::AlreadyExists,
                "An account already exists for this email",
            ),
            AccountsServiceError::InvalidCredentials => Self::new(
                CallableStatus::Unauthenticated,
                "Invalid email or password",
            ),
            AccountsServiceError::Identity(source) => {
                error!("identity provider error: {source}");

                Self::internal("Could not complete the account request")
            }
            AccountsServiceError::Mail(source) => {
                error!("failed to send mail: {source}");

                Self::internal("Could not send email")
            }
        }
    }
}

impl From<PaymentsServiceError> for CallableError {
    fn from(error: PaymentsServiceError) -> Self {
        match error {
            PaymentsServiceError::InvalidCustomer(source) => {
                Self::invalid_argument(source.to_string()).with_detail("customerData")
            }
            PaymentsServiceError::InvalidAmount => {
                Self::invalid_argument(error.to_string()).with_detail("amountInCents")
            }
            PaymentsServiceError::InvalidEmail => {
                Self::invalid_argument(error.to_string()).with_detail("customerEmail")
            }
            PaymentsServiceError::MissingTransactionId => {
                Self::invalid_argument(error.to_string()).with_detail("transactionId")
            }
            PaymentsServiceError::EmptyCart | PaymentsServiceError::NoPendingTransaction => {
                Self::new(CallableStatus::FailedPrecondition, error.to_string())
            }
            PaymentsServiceError::Gateway(source) => {
                error!("payment gateway error: {source}");

                Self::internal("Could not reach the payment gateway")
            }
            PaymentsServiceError::Pricing(_)
            | PaymentsServiceError::Cart(_)
            | PaymentsServiceError::LocalStorage(_) => {
                error!("checkout failed: {error}");

                Self::internal("Could not complete the checkout")
            }
        }
    }
}
