//! Paystack API client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use paymoment_core::Reference;

use crate::error::GatewayError;
use crate::types::{ApiEnvelope, InitializeData, InitializeRequest, VerifyData};
use crate::{PaymentStatus, PaymentVerifier, Verification};

/// Paystack API client.
///
/// The base URL is configurable so tests can point the client at a mock
/// provider; production uses `https://api.paystack.co`.
#[derive(Debug, Clone)]
pub struct PaystackClient {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl PaystackClient {
    /// Create a new Paystack client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Provider API URL (e.g., `"https://api.paystack.co"`)
    /// * `secret_key` - Secret API key (`sk_test_...` or `sk_live_...`)
    /// * `timeout` - Per-request timeout
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    pub fn new(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }

    /// Initialize a payment with the provider.
    ///
    /// Returns the hosted checkout URL and the reference the provider
    /// assigned to the payment attempt. Nothing is recorded locally; a
    /// transaction only exists once verification succeeds.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unavailable` on network or server errors,
    /// `GatewayError::Api` on provider-reported errors.
    pub async fn initialize(
        &self,
        email: &str,
        amount: i64,
    ) -> Result<InitializeData, GatewayError> {
        let url = format!("{}/transaction/initialize", self.base_url);
        let request = InitializeRequest {
            email: email.to_string(),
            amount,
        };

        tracing::debug!(email = %email, amount, "initializing payment with provider");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Fetch the provider's record of a payment attempt.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::UnknownReference` if the provider has no
    /// record of `reference`, `GatewayError::Unavailable` on network or
    /// server errors, `GatewayError::Api` on other provider errors.
    pub async fn verify_transaction(
        &self,
        reference: &Reference,
    ) -> Result<VerifyData, GatewayError> {
        let url = format!("{}/transaction/verify/{}", self.base_url, reference);

        tracing::debug!(reference = %reference, "verifying payment with provider");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::UnknownReference {
                reference: reference.to_string(),
            });
        }

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        // A provider-side server error is indeterminate, same as not
        // reaching the provider at all.
        if status.is_server_error() {
            return Err(GatewayError::Unavailable(format!("HTTP {status}")));
        }

        if status.is_success() {
            let envelope: ApiEnvelope<T> = response
                .json()
                .await
                .map_err(|e| GatewayError::Unavailable(format!("invalid response body: {e}")))?;

            if !envelope.status {
                return Err(GatewayError::Api {
                    status: status.as_u16(),
                    message: envelope.message,
                });
            }

            return envelope.data.ok_or_else(|| GatewayError::Api {
                status: status.as_u16(),
                message: "response envelope missing data".to_string(),
            });
        }

        // Try to parse the provider's error envelope
        let message = response
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .map_or_else(|_| format!("HTTP {status}"), |envelope| envelope.message);

        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PaymentVerifier for PaystackClient {
    async fn verify(&self, reference: &Reference) -> Result<Verification, GatewayError> {
        let data = self.verify_transaction(reference).await?;

        let status = match data.status.as_str() {
            "success" => PaymentStatus::Success,
            "failed" | "reversed" => PaymentStatus::Failed,
            // `abandoned`, `ongoing`, `pending`, `queued` and anything new
            // the provider introduces: not a terminal verdict.
            _ => PaymentStatus::Pending,
        };

        Ok(Verification {
            status,
            amount: data.amount,
            payer_email: data.customer.and_then(|c| c.email),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reference(raw: &str) -> Reference {
        Reference::new(raw).unwrap()
    }

    fn test_client(server: &MockServer) -> PaystackClient {
        PaystackClient::new(server.uri(), "sk_test_secret", Duration::from_secs(5))
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = PaystackClient::new(
            "https://api.paystack.co/",
            "sk_test_secret",
            Duration::from_secs(5),
        );
        assert_eq!(client.base_url, "https://api.paystack.co");
    }

    #[tokio::test]
    async fn initialize_returns_checkout_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .and(header("authorization", "Bearer sk_test_secret"))
            .and(body_json(json!({
                "email": "ada@example.com",
                "amount": 2000,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Authorization URL created",
                "data": {
                    "authorization_url": "https://checkout.paystack.com/abc123",
                    "access_code": "abc123",
                    "reference": "T685312322066231",
                },
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let data = client.initialize("ada@example.com", 2000).await.unwrap();

        assert_eq!(
            data.authorization_url,
            "https://checkout.paystack.com/abc123"
        );
        assert_eq!(data.reference, "T685312322066231");
    }

    #[tokio::test]
    async fn verify_maps_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transaction/verify/R1"))
            .and(header("authorization", "Bearer sk_test_secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Verification successful",
                "data": {
                    "status": "success",
                    "amount": 2000,
                    "reference": "R1",
                    "gateway_response": "Successful",
                    "customer": { "email": "ada@example.com" },
                },
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let verification = client.verify(&reference("R1")).await.unwrap();

        assert_eq!(verification.status, PaymentStatus::Success);
        assert_eq!(verification.amount, 2000);
        assert_eq!(verification.payer_email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn verify_maps_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transaction/verify/R1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Verification successful",
                "data": {
                    "status": "failed",
                    "amount": 2000,
                    "reference": "R1",
                    "gateway_response": "Declined",
                    "customer": { "email": "ada@example.com" },
                },
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let verification = client.verify(&reference("R1")).await.unwrap();

        assert_eq!(verification.status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn verify_maps_abandoned_to_pending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transaction/verify/R1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Verification successful",
                "data": {
                    "status": "abandoned",
                    "amount": 2000,
                    "reference": "R1",
                    "gateway_response": null,
                    "customer": null,
                },
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let verification = client.verify(&reference("R1")).await.unwrap();

        assert_eq!(verification.status, PaymentStatus::Pending);
        assert_eq!(verification.payer_email, None);
    }

    #[tokio::test]
    async fn verify_unknown_reference_is_definitive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transaction/verify/R404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": false,
                "message": "Transaction reference not found",
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.verify(&reference("R404")).await;

        assert!(matches!(
            result,
            Err(GatewayError::UnknownReference { .. })
        ));
    }

    #[tokio::test]
    async fn verify_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transaction/verify/R1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.verify(&reference("R1")).await;

        assert!(matches!(result, Err(GatewayError::Unavailable(_))));
    }

    #[tokio::test]
    async fn verify_timeout_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transaction/verify/R1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "status": true,
                        "message": "Verification successful",
                        "data": {
                            "status": "success",
                            "amount": 2000,
                            "reference": "R1",
                            "gateway_response": null,
                            "customer": null,
                        },
                    }))
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&server)
            .await;

        let client = PaystackClient::new(server.uri(), "sk_test_secret", Duration::from_millis(50));
        let result = client.verify(&reference("R1")).await;

        assert!(matches!(result, Err(GatewayError::Unavailable(_))));
    }

    #[tokio::test]
    async fn api_error_carries_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": false,
                "message": "Invalid key",
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.initialize("ada@example.com", 2000).await;

        match result {
            Err(GatewayError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
