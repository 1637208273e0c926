//! Identity Toolkit REST client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::identity::{
    AuthenticatedUser, IdentityError, IdentityProvider, Password, SignedInUser, UserId,
};

/// Default Identity Toolkit endpoint.
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Configuration for the identity provider.
#[derive(Clone)]
pub struct IdentityToolkitConfig {
    /// Base URL, e.g. `"https://identitytoolkit.googleapis.com"`.
    pub base_url: String,

    /// Project web API key.
    pub api_key: String,
}

impl std::fmt::Debug for IdentityToolkitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityToolkitConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"**redacted**")
            .finish()
    }
}

/// HTTP client for an Identity Toolkit compatible provider.
#[derive(Debug, Clone)]
pub struct IdentityToolkitClient {
    config: IdentityToolkitConfig,
    http: Client,
}

impl IdentityToolkitClient {
    #[must_use]
    pub fn new(config: IdentityToolkitConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/v1/accounts:{method}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn call<B: Serialize + Sync>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<Response, IdentityError> {
        let response = self
            .http
            .post(self.endpoint(method))
            .query(&[("key", self.config.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        debug!(%status, method, "identity provider rejected request");

        Err(map_error_body(&text))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountResponse>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a provider error body such as `{"error":{"message":"EMAIL_EXISTS"}}`.
fn map_error_body(body: &str) -> IdentityError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return IdentityError::UnexpectedResponse(body.to_string());
    };

    // Messages may carry a suffix, e.g. "WEAK_PASSWORD : Password should be ..."
    let code = envelope
        .error
        .message
        .split(" : ")
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    match code.as_str() {
        "EMAIL_EXISTS" => IdentityError::EmailExists,
        "INVALID_LOGIN_CREDENTIALS" | "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "USER_DISABLED" => {
            IdentityError::InvalidCredentials
        }
        "WEAK_PASSWORD" => IdentityError::WeakPassword,
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_NOT_FOUND" => IdentityError::InvalidToken,
        _ => IdentityError::UnexpectedResponse(envelope.error.message),
    }
}

fn into_user(account: AccountResponse) -> AuthenticatedUser {
    AuthenticatedUser {
        uid: UserId::new(account.local_id),
        email: account.email,
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn create_user(
        &self,
        email: &str,
        password: &Password,
    ) -> Result<AuthenticatedUser, IdentityError> {
        let response = self
            .call(
                "signUp",
                &PasswordRequest {
                    email,
                    password: password.expose(),
                    return_secure_token: true,
                },
            )
            .await?;

        let account: AccountResponse = response.json().await?;

        Ok(into_user(account))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &Password,
    ) -> Result<SignedInUser, IdentityError> {
        let response = self
            .call(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password: password.expose(),
                    return_secure_token: true,
                },
            )
            .await?;

        let mut account: AccountResponse = response.json().await?;

        let id_token = account.id_token.take().ok_or_else(|| {
            IdentityError::UnexpectedResponse("sign-in response had no idToken".to_string())
        })?;

        Ok(SignedInUser {
            user: into_user(account),
            id_token,
        })
    }

    async fn verify_id_token(&self, id_token: &str) -> Result<AuthenticatedUser, IdentityError> {
        let response = self.call("lookup", &LookupRequest { id_token }).await?;
        let lookup: LookupResponse = response.json().await?;

        let Some(account) = lookup.users.into_iter().next() else {
            warn!("identity lookup returned no users");

            return Err(IdentityError::InvalidToken);
        };

        Ok(into_user(account))
    }
}
