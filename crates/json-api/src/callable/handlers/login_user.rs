//! Login User Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::callable::{
    Callable, CallableError, app_state,
    handlers::{record_verification, register_user::CredentialsRequest},
};

/// Login User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginUserResponse {
    pub success: bool,

    /// Signed-in account
    pub uid: String,

    /// Bearer token for authenticated routes
    pub id_token: String,
}

/// Login User Handler
#[endpoint(tags("callable"), summary = "Login User with reCAPTCHA")]
pub(crate) async fn handler(
    json: JsonBody<Callable<CredentialsRequest>>,
    depot: &mut Depot,
) -> Result<Json<Callable<LoginUserResponse>>, CallableError> {
    let state = app_state(depot)?;
    let (email, password, token) = json.into_inner().into_inner().into_parts();

    let result = state.app.accounts.login(&email, &password, &token).await;

    record_verification(&result);

    let signed_in = result?;

    Ok(Json(Callable::new(LoginUserResponse {
        success: true,
        uid: signed_in.user.uid.to_string(),
        id_token: signed_in.id_token,
    })))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::{
        domain::accounts::AccountsServiceError, identity::SignedInUser,
        recaptcha::BotVerificationError,
    };
    use testresult::TestResult;

    use crate::{
        callable::errors::{CallableStatus, ErrorEnvelope},
        test_helpers::{Mocks, TEST_UID, public_service, test_user},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("loginUserWithRecaptcha").post(handler))
    }

    fn body() -> serde_json::Value {
        json!({
            "data": {
                "email": "ana@example.com",
                "password": "secret1",
                "recaptchaToken": "token"
            }
        })
    }

    #[tokio::test]
    async fn test_login_returns_id_token() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_login()
            .once()
            .withf(|email, password, _| email == "ana@example.com" && password.expose() == "secret1")
            .return_once(|_, _, _| {
                Ok(SignedInUser {
                    user: test_user(),
                    id_token: "id-token".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/loginUserWithRecaptcha")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(
            body,
            json!({ "data": { "success": true, "uid": TEST_UID, "idToken": "id-token" } })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthenticated() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_login()
            .once()
            .return_once(|_, _, _| Err(AccountsServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/loginUserWithRecaptcha")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let envelope: ErrorEnvelope = res.take_json().await?;

        assert_eq!(envelope.error.status, CallableStatus::Unauthenticated);

        Ok(())
    }

    #[tokio::test]
    async fn test_verification_outage_is_internal() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.accounts.expect_login().once().return_once(|_, _, _| {
            Err(AccountsServiceError::VerificationUnavailable(
                BotVerificationError::UnexpectedResponse("timeout".to_string()),
            ))
        });

        let mut res = TestClient::post("http://example.com/loginUserWithRecaptcha")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        let envelope: ErrorEnvelope = res.take_json().await?;

        assert_eq!(envelope.error.status, CallableStatus::Internal);
        assert_eq!(envelope.error.message, "Could not verify reCAPTCHA");

        Ok(())
    }
}
