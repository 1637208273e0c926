//! Create Wompi Transaction Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::customer::{CustomerProfile, LegalIdType};
use storefront_app::domain::payments::{CheckoutRequest, PaymentsServiceError};

use crate::callable::{Callable, CallableError, app_state};

/// Customer contact and identification data
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CustomerDataRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub legal_id: String,

    /// One of `CC`, `CE`, `NIT`, `PP`, `TI`, `DNI`
    pub legal_id_type: String,
}

impl TryFrom<CustomerDataRequest> for CustomerProfile {
    type Error = PaymentsServiceError;

    fn try_from(data: CustomerDataRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            legal_id_type: data.legal_id_type.parse::<LegalIdType>()?,
            full_name: data.full_name,
            email: data.email,
            phone_number: data.phone_number,
            legal_id: data.legal_id,
        })
    }
}

/// Create Transaction Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTransactionRequest {
    /// Total in minor currency units
    #[serde(default)]
    pub amount_in_cents: i64,

    /// Receipt address
    #[serde(default)]
    pub customer_email: String,

    #[serde(default)]
    pub customer_data: CustomerDataRequest,
}

/// Create Transaction Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTransactionResponse {
    pub success: bool,

    /// Gateway transaction id, polled for the final status
    pub transaction_id: String,

    /// Merchant reference sent with the transaction
    pub reference: String,

    /// Hosted payment page
    pub redirect_url: Option<String>,
}

/// Create Wompi Transaction Handler
///
/// Validates the checkout and opens a COP transaction at the gateway.
#[endpoint(tags("callable"), summary = "Create Wompi Transaction")]
pub(crate) async fn handler(
    json: JsonBody<Callable<CreateTransactionRequest>>,
    depot: &mut Depot,
) -> Result<Json<Callable<CreateTransactionResponse>>, CallableError> {
    let state = app_state(depot)?;
    let request = json.into_inner().into_inner();

    let checkout = CheckoutRequest {
        amount_in_cents: request.amount_in_cents,
        customer_email: request.customer_email,
        customer_data: request.customer_data.try_into()?,
    };

    let created = state.app.payments.create_transaction(checkout).await?;

    Ok(Json(Callable::new(CreateTransactionResponse {
        success: true,
        transaction_id: created.transaction_id,
        reference: created.reference.to_string(),
        redirect_url: created.redirect_url,
    })))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::checkout::TransactionReference;
    use storefront_app::domain::payments::{CreatedCheckout, GatewayError};
    use testresult::TestResult;

    use crate::{
        callable::errors::{CallableStatus, ErrorEnvelope},
        test_helpers::{Mocks, public_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("createWompiTransaction").post(handler))
    }

    fn body(legal_id_type: &str) -> serde_json::Value {
        json!({
            "data": {
                "amountInCents": 150_000,
                "customerEmail": "ana@example.com",
                "customerData": {
                    "full_name": "Ana Gómez",
                    "email": "ana@example.com",
                    "phone_number": "3001234567",
                    "legal_id": "1020304050",
                    "legal_id_type": legal_id_type
                }
            }
        })
    }

    #[tokio::test]
    async fn test_create_transaction_returns_gateway_ids() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_create_transaction()
            .once()
            .withf(|checkout| {
                checkout.amount_in_cents == 150_000
                    && checkout.customer_data.legal_id_type == LegalIdType::Cc
            })
            .return_once(|_| {
                Ok(CreatedCheckout {
                    transaction_id: "txn-1".to_string(),
                    reference: TransactionReference::from("ORDER-1".to_string()),
                    redirect_url: Some("https://shop.example.com/done".to_string()),
                })
            });

        let response: Callable<CreateTransactionResponse> =
            TestClient::post("http://example.com/createWompiTransaction")
                .json(&body("cc"))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert!(response.data.success, "expected success");
        assert_eq!(response.data.transaction_id, "txn-1");
        assert_eq!(response.data.reference, "ORDER-1");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_legal_id_type_makes_no_gateway_call() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.payments.expect_create_transaction().never();

        let mut res = TestClient::post("http://example.com/createWompiTransaction")
            .json(&body("XX"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let envelope: ErrorEnvelope = res.take_json().await?;

        assert_eq!(envelope.error.status, CallableStatus::InvalidArgument);
        assert_eq!(envelope.error.details, Some(vec!["customerData".to_string()]));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_amount_is_invalid_argument() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_create_transaction()
            .once()
            .return_once(|_| Err(PaymentsServiceError::InvalidAmount));

        let mut res = TestClient::post("http://example.com/createWompiTransaction")
            .json(&body("CC"))
            .send(&make_service(mocks))
            .await;

        let envelope: ErrorEnvelope = res.take_json().await?;

        assert_eq!(envelope.error.details, Some(vec!["amountInCents".to_string()]));

        Ok(())
    }

    #[tokio::test]
    async fn test_gateway_failure_is_internal() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.payments.expect_create_transaction().once().return_once(|_| {
            Err(PaymentsServiceError::Gateway(GatewayError::UnexpectedResponse(
                "status 422".to_string(),
            )))
        });

        let mut res = TestClient::post("http://example.com/createWompiTransaction")
            .json(&body("CC"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let envelope: ErrorEnvelope = res.take_json().await?;

        assert_eq!(envelope.error.message, "Could not reach the payment gateway");

        Ok(())
    }
}
