//! Common test utilities for paymoment integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use jsonwebtoken::{encode, EncodingKey, Header};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paymoment_core::AccountId;
use paymoment_service::auth::JwtClaims;
use paymoment_service::{create_router, AppState, ServiceConfig};
use paymoment_store::RocksLedger;

/// Shared HS256 secret for the harness config and minted tokens.
pub const TEST_AUTH_SECRET: &str = "test-secret";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// A test account ID for authenticated requests.
    pub account_id: AccountId,
}

impl TestHarness {
    /// Create a new test harness with no payment provider configured.
    pub fn new() -> Self {
        Self::build(None, 0)
    }

    /// Create a harness whose provider client points at a mock server.
    pub fn with_provider(provider_url: &str) -> Self {
        Self::build(Some(provider_url), 0)
    }

    /// Create a harness that grants a starting balance on registration.
    pub fn with_signup_bonus(bonus: i64) -> Self {
        Self::build(None, bonus)
    }

    /// Create a harness with a mock provider and a signup bonus.
    pub fn with_provider_and_bonus(provider_url: &str, bonus: i64) -> Self {
        Self::build(Some(provider_url), bonus)
    }

    fn build(provider_url: Option<&str>, signup_bonus: i64) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let ledger = RocksLedger::open(temp_dir.path()).expect("Failed to open ledger");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            auth_secret: TEST_AUTH_SECRET.into(),
            auth_issuer: "paymoment-id".into(),
            auth_audience: "paymoment".into(),
            provider_base_url: provider_url.unwrap_or("http://127.0.0.1:1").to_string(),
            provider_secret_key: provider_url.map(|_| "sk_test_secret".to_string()),
            provider_timeout_seconds: 5,
            signup_bonus,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::new(ledger), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");
        let account_id = AccountId::generate();

        Self {
            server,
            _temp_dir: temp_dir,
            account_id,
        }
    }

    /// Get the authorization header for the harness account.
    pub fn auth_header(&self) -> String {
        auth_header_for(self.account_id)
    }

    /// Create the harness account, asserting success.
    pub async fn create_account(&self) {
        self.server
            .post("/v1/accounts")
            .add_header("authorization", self.auth_header())
            .json(&serde_json::json!({ "email": "ada@example.com" }))
            .await
            .assert_status_ok();
    }

    /// Credit the harness account by verifying a mocked successful payment.
    pub async fn fund(&self, provider: &MockServer, reference: &str, amount: i64) {
        mount_verify_success(provider, reference, amount).await;
        self.server
            .post("/v1/deposits/verify")
            .add_header("authorization", self.auth_header())
            .json(&serde_json::json!({ "reference": reference, "amount": amount }))
            .await
            .assert_status_ok();
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Mint a bearer header for an arbitrary account id.
pub fn auth_header_for(account_id: AccountId) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        sub: account_id.to_string(),
        aud: "paymoment".to_string(),
        iss: "paymoment-id".to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_AUTH_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token");
    format!("Bearer {token}")
}

/// Mount a successful provider verification for `reference`.
pub async fn mount_verify_success(provider: &MockServer, reference: &str, amount: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/transaction/verify/{reference}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "message": "Verification successful",
            "data": {
                "status": "success",
                "amount": amount,
                "reference": reference,
                "gateway_response": "Successful",
                "customer": { "email": "ada@example.com" },
            },
        })))
        .mount(provider)
        .await;
}

/// Mount a provider verification with an arbitrary payment status.
pub async fn mount_verify_status(
    provider: &MockServer,
    reference: &str,
    status: &str,
    amount: i64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/transaction/verify/{reference}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "message": "Verification successful",
            "data": {
                "status": status,
                "amount": amount,
                "reference": reference,
                "gateway_response": null,
                "customer": null,
            },
        })))
        .mount(provider)
        .await;
}
