//! Register User Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::identity::Password;

use crate::callable::{Callable, CallableError, app_state, handlers::record_verification};

/// Account credentials guarded by a reCAPTCHA token.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CredentialsRequest {
    /// Account email
    #[serde(default)]
    pub email: String,

    /// Account password
    #[serde(default)]
    pub password: String,

    /// Client-side challenge token
    #[serde(default)]
    pub recaptcha_token: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish_non_exhaustive()
    }
}

impl CredentialsRequest {
    pub(crate) fn into_parts(self) -> (String, Password, String) {
        (self.email, Password::new(self.password), self.recaptcha_token)
    }
}

/// Register User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterUserResponse {
    pub success: bool,

    /// Identifier of the new account
    pub uid: String,
}

/// Register User Handler
///
/// Creates an account once the request passes bot verification.
#[endpoint(tags("callable"), summary = "Register User with reCAPTCHA")]
pub(crate) async fn handler(
    json: JsonBody<Callable<CredentialsRequest>>,
    depot: &mut Depot,
) -> Result<Json<Callable<RegisterUserResponse>>, CallableError> {
    let state = app_state(depot)?;
    let (email, password, token) = json.into_inner().into_inner().into_parts();

    let result = state.app.accounts.register(&email, &password, &token).await;

    record_verification(&result);

    let user = result?;

    Ok(Json(Callable::new(RegisterUserResponse {
        success: true,
        uid: user.uid.to_string(),
    })))
}
