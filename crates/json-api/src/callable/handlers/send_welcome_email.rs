//! Send Welcome Email Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::callable::{Callable, CallableError, app_state};

/// Send Welcome Email Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendWelcomeEmailRequest {
    /// Recipient address
    #[serde(default)]
    pub email: String,

    /// Name used in the greeting
    #[serde(default)]
    pub full_name: String,
}

/// Send Welcome Email Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SendWelcomeEmailResponse {
    pub success: bool,
    pub message: String,
}

/// Send Welcome Email Handler
#[endpoint(tags("callable"), summary = "Send Welcome Email")]
pub(crate) async fn handler(
    json: JsonBody<Callable<SendWelcomeEmailRequest>>,
    depot: &mut Depot,
) -> Result<Json<Callable<SendWelcomeEmailResponse>>, CallableError> {
    let state = app_state(depot)?;
    let request = json.into_inner().into_inner();

    let sent = state
        .app
        .accounts
        .send_welcome_email(&request.email, &request.full_name)
        .await?;

    Ok(Json(Callable::new(SendWelcomeEmailResponse {
        success: true,
        message: format!("Welcome email sent to {}", sent.to),
    })))
}
