//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{accounts, deposits, health, payments, wallet};
use crate::state::AppState;

/// Maximum concurrent requests for the API endpoints.
/// Deposit verification holds a provider round trip in flight, so the
/// API tier is capped to keep a slow provider from pinning every worker.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Accounts (bearer JWT auth)
/// - `POST /v1/accounts` - Register the wallet account
/// - `GET /v1/accounts/me` - Get the current account
///
/// ## Wallet (bearer JWT auth)
/// - `GET /v1/wallet/balance` - Get current balance
/// - `GET /v1/wallet/transactions` - List transaction history
/// - `GET /v1/wallet/verification-attempts` - List the verification audit log
///
/// ## Deposits (bearer JWT auth)
/// - `POST /v1/deposits` - Initialize a deposit with the provider
/// - `POST /v1/deposits/verify` - Verify a payment and credit the wallet
///
/// ## Payments (bearer JWT auth)
/// - `POST /v1/payments` - Debit the wallet for a service charge
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Create concurrency-limited API routes
    let api_routes = Router::new()
        // Accounts
        .route("/accounts", post(accounts::create_account))
        .route("/accounts/me", get(accounts::get_account))
        // Wallet
        .route("/wallet/balance", get(wallet::get_balance))
        .route("/wallet/transactions", get(wallet::list_transactions))
        .route(
            "/wallet/verification-attempts",
            get(wallet::list_verification_attempts),
        )
        // Deposits
        .route("/deposits", post(deposits::initialize_deposit))
        .route("/deposits/verify", post(deposits::verify_deposit))
        // Payments
        .route("/payments", post(payments::pay_for_service))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no concurrency limit)
        .route("/health", get(health::health))
        // API v1 routes (concurrency limited)
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
