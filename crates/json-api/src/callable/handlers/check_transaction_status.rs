//! Check Wompi Transaction Status Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    callable::{Callable, CallableError, app_state},
    observability::observe_payment_status,
};

/// Check Transaction Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckTransactionStatusRequest {
    #[serde(default)]
    pub transaction_id: String,
}

/// Check Transaction Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckTransactionStatusResponse {
    pub transaction_id: String,

    /// Gateway status, passed through verbatim
    pub status: String,
}

/// Check Wompi Transaction Status Handler
#[endpoint(tags("callable"), summary = "Check Wompi Transaction Status")]
pub(crate) async fn handler(
    json: JsonBody<Callable<CheckTransactionStatusRequest>>,
    depot: &mut Depot,
) -> Result<Json<Callable<CheckTransactionStatusResponse>>, CallableError> {
    let state = app_state(depot)?;
    let request = json.into_inner().into_inner();
    let transaction_id = request.transaction_id.trim();

    let status = state.app.payments.check_status(transaction_id).await?;

    observe_payment_status(&status);

    Ok(Json(Callable::new(CheckTransactionStatusResponse {
        transaction_id: transaction_id.to_string(),
        status: status.as_str().to_string(),
    })))
}
