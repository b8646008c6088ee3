//! Wallet balance, history, and audit-log integration tests.

mod common;

use common::TestHarness;
use wiremock::MockServer;

// ============================================================================
// Balance
// ============================================================================

#[tokio::test]
async fn get_balance_starts_at_zero() {
    let harness = TestHarness::new();

    harness.create_account().await;

    let response = harness
        .server
        .get("/v1/wallet/balance")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 0);
}

#[tokio::test]
async fn get_balance_without_account_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/wallet/balance")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn get_balance_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/wallet/balance").await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Transactions
// ============================================================================

#[tokio::test]
async fn list_transactions_empty() {
    let harness = TestHarness::new();

    harness.create_account().await;

    let response = harness
        .server
        .get("/v1/wallet/transactions")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["transactions"].as_array().unwrap().is_empty());
    assert_eq!(body["has_more"], false);
}

#[tokio::test]
async fn list_transactions_newest_first() {
    let provider = MockServer::start().await;
    let harness = TestHarness::with_provider(&provider.uri());

    harness.create_account().await;
    harness.fund(&provider, "R1", 2000).await;

    // ULID ordering needs distinct timestamps
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    harness
        .server
        .post("/v1/payments")
        .add_header("authorization", harness.auth_header())
        .json(&serde_json::json!({
            "kind": "payment",
            "amount": 500,
            "description": "airtime"
        }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get("/v1/wallet/transactions")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let transactions = body["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["kind"], "payment");
    assert_eq!(transactions[0]["amount"], -500);
    assert_eq!(transactions[1]["kind"], "deposit");
    assert_eq!(transactions[1]["amount"], 2000);
    assert_eq!(body["has_more"], false);
}

#[tokio::test]
async fn list_transactions_respects_limit() {
    let provider = MockServer::start().await;
    let harness = TestHarness::with_provider(&provider.uri());

    harness.create_account().await;
    harness.fund(&provider, "R1", 2000).await;
    harness.fund(&provider, "R2", 3000).await;

    let response = harness
        .server
        .get("/v1/wallet/transactions?limit=1")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);
    assert_eq!(body["has_more"], true);
}

// ============================================================================
// Verification Attempts
// ============================================================================

#[tokio::test]
async fn list_attempts_empty() {
    let harness = TestHarness::new();

    harness.create_account().await;

    let response = harness
        .server
        .get("/v1/wallet/verification-attempts")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["attempts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_attempts_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/wallet/verification-attempts").await;

    response.assert_status_unauthorized();
}
