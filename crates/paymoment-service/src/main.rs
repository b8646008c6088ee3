//! PayMoment Service - HTTP API for the wallet ledger
//!
//! This is the main entry point for the paymoment service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paymoment_service::{create_router, AppState, ServiceConfig};
use paymoment_store::RocksLedger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paymoment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PayMoment Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        provider_configured = %config.provider_secret_key.is_some(),
        "Service configuration loaded"
    );

    // Open the ledger database
    tracing::info!(path = %config.data_dir, "Opening ledger database");
    let ledger = Arc::new(RocksLedger::open(&config.data_dir)?);

    // Build app state
    let state = AppState::new(ledger, config.clone());

    // Create the router
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
