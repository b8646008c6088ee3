//! Service payment (debit) integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use wiremock::MockServer;

#[tokio::test]
async fn payment_reduces_balance() {
    let provider = MockServer::start().await;
    let harness = TestHarness::with_provider(&provider.uri());
    harness.create_account().await;
    harness.fund(&provider, "R1", 7000).await;

    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "payment",
            "amount": 3000,
            "description": "electricity",
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 4000);
    assert_eq!(body["transaction"]["kind"], "payment");
    assert_eq!(body["transaction"]["amount"], -3000);
    assert_eq!(body["transaction"]["description"], "electricity");
    let reference = body["transaction"]["reference"].as_str().unwrap();
    assert!(reference.starts_with("PMT-"));
}

#[tokio::test]
async fn withdrawal_uses_its_own_reference_prefix() {
    let provider = MockServer::start().await;
    let harness = TestHarness::with_provider(&provider.uri());
    harness.create_account().await;
    harness.fund(&provider, "R1", 5000).await;

    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "withdrawal",
            "amount": 1000,
            "description": "cash out",
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let reference = body["transaction"]["reference"].as_str().unwrap();
    assert!(reference.starts_with("WDL-"));
}

#[tokio::test]
async fn insufficient_funds_is_payment_required() {
    let provider = MockServer::start().await;
    let harness = TestHarness::with_provider(&provider.uri());
    harness.create_account().await;
    harness.fund(&provider, "R1", 4000).await;

    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "payment",
            "amount": 10000,
            "description": "electricity",
        }))
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_funds");
    assert_eq!(body["error"]["details"]["balance"], 4000);
    assert_eq!(body["error"]["details"]["required"], 10000);

    // Balance untouched
    let response = harness
        .server
        .get("/v1/wallet/balance")
        .add_header("authorization", harness.auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 4000);
}

#[tokio::test]
async fn payment_with_credit_kind_fails() {
    let harness = TestHarness::new();
    harness.create_account().await;

    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "deposit",
            "amount": 1000,
            "description": "sneaky credit",
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn payment_with_zero_amount_fails() {
    let harness = TestHarness::new();
    harness.create_account().await;

    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "payment",
            "amount": 0,
            "description": "nothing",
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn payment_with_empty_description_fails() {
    let harness = TestHarness::new();
    harness.create_account().await;

    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "payment",
            "amount": 1000,
            "description": "   ",
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn payment_without_account_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "payment",
            "amount": 1000,
            "description": "electricity",
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn payment_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/payments")
        .json(&json!({
            "kind": "payment",
            "amount": 1000,
            "description": "electricity",
        }))
        .await;

    response.assert_status_unauthorized();
}

// ============================================================================
// End-to-end wallet lifecycle
// ============================================================================

#[tokio::test]
async fn full_wallet_lifecycle() {
    let provider = MockServer::start().await;
    let harness = TestHarness::with_provider_and_bonus(&provider.uri(), 5000);
    harness.create_account().await;

    // Signup bonus lands on registration
    let response = harness
        .server
        .get("/v1/wallet/balance")
        .add_header("authorization", harness.auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 5000);

    // A verified deposit credits the wallet
    harness.fund(&provider, "R1", 2000).await;
    let response = harness
        .server
        .get("/v1/wallet/balance")
        .add_header("authorization", harness.auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 7000);

    // Replaying the same reference changes nothing
    let response = harness
        .server
        .post("/v1/deposits/verify")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "reference": "R1", "amount": 2000 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["replayed"], true);
    assert_eq!(body["balance"], 7000);

    // Paying for a service debits the wallet
    // (ULID ordering needs distinct timestamps)
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "payment",
            "amount": 3000,
            "description": "electricity",
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 4000);

    // Overdrafts are refused and leave the balance alone
    let response = harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&json!({
            "kind": "payment",
            "amount": 10000,
            "description": "rent",
        }))
        .await;
    response.assert_status(StatusCode::PAYMENT_REQUIRED);

    let response = harness
        .server
        .get("/v1/wallet/balance")
        .add_header("authorization", harness.auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 4000);

    // History shows the full story, newest first
    let response = harness
        .server
        .get("/v1/wallet/transactions")
        .add_header("authorization", harness.auth_header())
        .await;
    let body: serde_json::Value = response.json();
    let transactions = body["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["kind"], "payment");
    assert_eq!(transactions[1]["kind"], "deposit");
}
