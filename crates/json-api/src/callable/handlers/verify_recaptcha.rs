//! Verify reCAPTCHA Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::verification::{RejectionReason, Verdict};

use crate::{
    callable::{Callable, CallableError, app_state},
    observability::observe_verification,
};

/// Verify reCAPTCHA Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyRecaptchaRequest {
    /// Client-side challenge token
    #[serde(default)]
    pub recaptcha_token: String,
}

/// Verify reCAPTCHA Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyRecaptchaResponse {
    /// Whether the request looks human
    pub success: bool,

    /// Trust score reported by the provider, 0 when unavailable
    pub score: f64,

    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Verdict> for VerifyRecaptchaResponse {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Human { score } => Self {
                success: true,
                score,
                message: None,
            },
            Verdict::Rejected(reason) => Self {
                success: false,
                score: match reason {
                    RejectionReason::LowScore { score, .. } => score.unwrap_or_default(),
                    RejectionReason::ProviderFailure { .. } => 0.0,
                },
                message: Some("reCAPTCHA verification failed".to_string()),
            },
        }
    }
}

/// Verify reCAPTCHA Handler
///
/// Runs bot verification on its own. A rejected token is a normal response
/// with `success: false`; only missing input and provider outages are errors.
#[endpoint(tags("callable"), summary = "Verify reCAPTCHA Token")]
pub(crate) async fn handler(
    json: JsonBody<Callable<VerifyRecaptchaRequest>>,
    depot: &mut Depot,
) -> Result<Json<Callable<VerifyRecaptchaResponse>>, CallableError> {
    let state = app_state(depot)?;
    let request = json.into_inner().into_inner();

    let verdict = state
        .app
        .accounts
        .verify_human(&request.recaptcha_token)
        .await
        .inspect_err(|_| observe_verification("error"))?;

    observe_verification(if verdict.is_human() { "human" } else { "rejected" });

    Ok(Json(Callable::new(verdict.into())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::{domain::accounts::AccountsServiceError, recaptcha::BotVerificationError};
    use testresult::TestResult;

    use crate::{
        callable::errors::{CallableStatus, ErrorEnvelope},
        test_helpers::{Mocks, public_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("verifyRecaptcha").post(handler))
    }

    #[tokio::test]
    async fn test_human_token_returns_score() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_verify_human()
            .once()
            .withf(|token| token == "token")
            .return_once(|_| Ok(Verdict::Human { score: 0.9 }));

        let response: Callable<VerifyRecaptchaResponse> =
            TestClient::post("http://example.com/verifyRecaptcha")
                .json(&json!({ "data": { "recaptchaToken": "token" } }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert!(response.data.success, "expected success");
        assert!((response.data.score - 0.9).abs() < f64::EPSILON);
        assert_eq!(response.data.message, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_low_score_is_unsuccessful_response() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.accounts.expect_verify_human().once().return_once(|_| {
            Ok(Verdict::Rejected(RejectionReason::LowScore {
                score: Some(0.1),
                threshold: 0.5,
            }))
        });

        let mut res = TestClient::post("http://example.com/verifyRecaptcha")
            .json(&json!({ "data": { "recaptchaToken": "token" } }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: Callable<VerifyRecaptchaResponse> = res.take_json().await?;

        assert!(!response.data.success, "expected failure");
        assert!((response.data.score - 0.1).abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_token_is_invalid_argument() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_verify_human()
            .once()
            .withf(|token| token.is_empty())
            .return_once(|_| Err(AccountsServiceError::MissingField("recaptchaToken")));

        let mut res = TestClient::post("http://example.com/verifyRecaptcha")
            .json(&json!({ "data": {} }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let envelope: ErrorEnvelope = res.take_json().await?;

        assert_eq!(envelope.error.status, CallableStatus::InvalidArgument);
        assert_eq!(
            envelope.error.details,
            Some(vec!["recaptchaToken".to_string()])
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_provider_outage_is_internal() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.accounts.expect_verify_human().once().return_once(|_| {
            Err(AccountsServiceError::VerificationUnavailable(
                BotVerificationError::UnexpectedResponse("status 503".to_string()),
            ))
        });

        let mut res = TestClient::post("http://example.com/verifyRecaptcha")
            .json(&json!({ "data": { "recaptchaToken": "token" } }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let envelope: ErrorEnvelope = res.take_json().await?;

        assert_eq!(envelope.error.status, CallableStatus::Internal);
        assert!(
            !envelope.error.message.contains("503"),
            "upstream details leaked: {}",
            envelope.error.message
        );

        Ok(())
    }
}
