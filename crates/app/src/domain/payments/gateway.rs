//! Wompi payment gateway client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use storefront::{
    checkout::{TransactionReference, TransactionStatus},
    customer::CustomerProfile,
};
use thiserror::Error;
use tracing::{error, info};

/// Sandbox API root.
pub const DEFAULT_WOMPI_BASE_URL: &str = "https://sandbox.wompi.co";

#[derive(Clone)]
pub struct WompiConfig {
    /// API root, e.g. `"https://sandbox.wompi.co"`.
    pub base_url: String,

    /// Private key used to create transactions.
    pub private_key: String,

    /// Key used to sign transaction amounts.
    pub integrity_secret: String,

    /// Where the hosted checkout sends the shopper afterwards.
    pub redirect_url: String,
}

impl std::fmt::Debug for WompiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WompiConfig")
            .field("base_url", &self.base_url)
            .field("private_key", &"**redacted**")
            .field("integrity_secret", &"**redacted**")
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}

/// Transaction details to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub reference: TransactionReference,
    pub amount_in_cents: i64,
    pub currency: &'static str,
    pub customer: CustomerProfile,
}

/// Transaction as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayTransaction {
    pub id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submit a new transaction.
    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<GatewayTransaction, GatewayError>;

    /// Fetch the current state of a transaction.
    async fn transaction_status(&self, id: &str) -> Result<GatewayTransaction, GatewayError>;
}

/// Integrity signature binding a transaction to its amount and currency:
/// hex SHA-256 of reference, amount in cents, currency and secret, concatenated.
#[must_use]
pub fn integrity_signature(
    reference: &TransactionReference,
    amount_in_cents: i64,
    currency: &str,
    secret: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(reference.as_str().as_bytes());
    hasher.update(amount_in_cents.to_string().as_bytes());
    hasher.update(currency.as_bytes());
    hasher.update(secret.as_bytes());

    hex::encode(hasher.finalize())
}

#[derive(Debug, Serialize)]
struct PaymentMethod {
    #[serde(rename = "type")]
    kind: &'static str,
    installments: u8,
}

#[derive(Debug, Serialize)]
struct CustomerData<'a> {
    full_name: &'a str,
    email: &'a str,
    phone_number: String,
    legal_id: &'a str,
    legal_id_type: String,
}

#[derive(Debug, Serialize)]
struct TransactionBody<'a> {
    amount_in_cents: i64,
    currency: &'a str,
    customer_email: &'a str,
    payment_method: PaymentMethod,
    reference: &'a str,
    redirect_url: &'a str,
    customer_data: CustomerData<'a>,
    signature: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: GatewayTransaction,
}

/// HTTP client for the Wompi transactions API.
#[derive(Debug, Clone)]
pub struct WompiClient {
    config: WompiConfig,
    http: Client,
}

impl WompiClient {
    #[must_use]
    pub fn new(config: WompiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn transactions_url(&self) -> String {
        format!(
            "{}/v1/transactions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn body<'a>(&'a self, transaction: &'a NewTransaction) -> TransactionBody<'a> {
        let customer = &transaction.customer;

        TransactionBody {
            amount_in_cents: transaction.amount_in_cents,
            currency: transaction.currency,
            customer_email: customer.email.trim(),
            payment_method: PaymentMethod {
                kind: "CARD",
                installments: 1,
            },
            reference: transaction.reference.as_str(),
            redirect_url: &self.config.redirect_url,
            customer_data: CustomerData {
                full_name: customer.full_name.trim(),
                email: customer.email.trim(),
                phone_number: customer.phone_with_country_code(),
                legal_id: customer.legal_id.trim(),
                legal_id_type: customer.legal_id_type.to_string(),
            },
            signature: integrity_signature(
                &transaction.reference,
                transaction.amount_in_cents,
                transaction.currency,
                &self.config.integrity_secret,
            ),
        }
    }
}

async fn read_transaction(
    response: Response,
    action: &str,
) -> Result<GatewayTransaction, GatewayError> {
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        error!(%status, body = %text, action, "payment gateway rejected request");

        return Err(GatewayError::UnexpectedResponse(format!(
            "{action} failed with status {status}"
        )));
    }

    let envelope: Envelope = response.json().await?;

    Ok(envelope.data)
}

#[async_trait]
impl PaymentGateway for WompiClient {
    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<GatewayTransaction, GatewayError> {
        let response = self
            .http
            .post(self.transactions_url())
            .bearer_auth(&self.config.private_key)
            .json(&self.body(transaction))
            .send()
            .await?;

        let created = read_transaction(response, "create transaction").await?;

        info!(
            transaction = %created.id,
            reference = %transaction.reference,
            "created payment transaction"
        );

        Ok(created)
    }

    async fn transaction_status(&self, id: &str) -> Result<GatewayTransaction, GatewayError> {
        let response = self
            .http
            .get(format!("{}/{id}", self.transactions_url()))
            .send()
            .await?;

        read_transaction(response, "transaction status").await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use storefront::customer::LegalIdType;
    use testresult::TestResult;

    use super::*;

    fn client() -> WompiClient {
        WompiClient::new(WompiConfig {
            base_url: "https://sandbox.wompi.co/".to_string(),
            private_key: "prv_test".to_string(),
            integrity_secret: "test_integrity".to_string(),
            redirect_url: "https://shop.example.com/success".to_string(),
        })
    }

    fn transaction() -> NewTransaction {
        NewTransaction {
            reference: TransactionReference::from("REF_1700000000000_abcd1234".to_string()),
            amount_in_cents: 18_000_000,
            currency: "COP",
            customer: CustomerProfile {
                full_name: "Ana Gómez".to_string(),
                email: "ana@example.com".to_string(),
                phone_number: "300 123 4567".to_string(),
                legal_id: "1020304050".to_string(),
                legal_id_type: LegalIdType::Cc,
            },
        }
    }

    #[test]
    fn signature_is_hex_sha256_of_concatenated_fields() {
        let reference = TransactionReference::from("sk8-438k4-xmxm392-sn2m".to_string());

        let signature = integrity_signature(
            &reference,
            2_490_000,
            "COP",
            "prod_integrity_Z5mMke9x0k8gpErbDqwrJXMqsI6SFli6",
        );

        let expected = hex::encode(Sha256::digest(
            "sk8-438k4-xmxm392-sn2m2490000COPprod_integrity_Z5mMke9x0k8gpErbDqwrJXMqsI6SFli6",
        ));

        assert_eq!(signature, expected);
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn body_carries_card_payment_and_country_code() -> TestResult {
        let client = client();
        let transaction = transaction();

        let body = serde_json::to_value(client.body(&transaction))?;

        assert_eq!(body.pointer("/amount_in_cents"), Some(&json!(18_000_000)));
        assert_eq!(body.pointer("/currency"), Some(&json!("COP")));
        assert_eq!(body.pointer("/payment_method/type"), Some(&json!("CARD")));
        assert_eq!(body.pointer("/payment_method/installments"), Some(&json!(1)));
        assert_eq!(
            body.pointer("/customer_data/phone_number"),
            Some(&json!("573001234567"))
        );
        assert_eq!(body.pointer("/customer_data/legal_id_type"), Some(&json!("CC")));
        assert_eq!(
            body.pointer("/redirect_url"),
            Some(&json!("https://shop.example.com/success"))
        );
        assert_eq!(
            body.pointer("/signature"),
            Some(&json!(integrity_signature(
                &transaction.reference,
                18_000_000,
                "COP",
                "test_integrity"
            )))
        );

        Ok(())
    }

    #[test]
    fn transactions_url_trims_trailing_slash() {
        assert_eq!(
            client().transactions_url(),
            "https://sandbox.wompi.co/v1/transactions"
        );
    }

    #[test]
    fn envelope_decodes_unknown_status_verbatim() -> TestResult {
        let envelope: Envelope = serde_json::from_value(json!({
            "data": { "id": "12-abc", "status": "VOIDED", "redirect_url": null }
        }))?;

        assert_eq!(
            envelope.data.status,
            TransactionStatus::Unrecognized("VOIDED".to_string())
        );
        assert_eq!(envelope.data.redirect_url, None);

        Ok(())
    }

    #[test]
    fn config_debug_hides_keys() {
        let rendered = format!("{:?}", client().config);

        assert!(!rendered.contains("prv_test"));
        assert!(!rendered.contains("test_integrity"));
    }
}
