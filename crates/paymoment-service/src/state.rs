//! Application state.

use std::sync::Arc;
use std::time::Duration;

use paymoment_gateway::{PaymentVerifier, PaystackClient};
use paymoment_store::{LedgerStore, RocksLedger};

use crate::config::ServiceConfig;
use crate::credit::CreditService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The ledger storage backend.
    pub ledger: Arc<RocksLedger>,

    /// Payment provider client for deposit initialization (optional).
    pub provider: Option<Arc<PaystackClient>>,

    /// The verify-then-credit orchestrator.
    pub credit: Arc<CreditService>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(ledger: Arc<RocksLedger>, config: ServiceConfig) -> Self {
        // Create the provider client if configured
        let provider = config.provider_secret_key.as_ref().map(|key| {
            tracing::info!(provider_url = %config.provider_base_url, "payment provider enabled");
            Arc::new(PaystackClient::new(
                &config.provider_base_url,
                key,
                Duration::from_secs(config.provider_timeout_seconds),
            ))
        });

        if provider.is_none() {
            tracing::warn!("payment provider not configured - deposits cannot be verified");
        }

        let credit = Arc::new(CreditService::new(
            Arc::clone(&ledger) as Arc<dyn LedgerStore>,
            provider
                .clone()
                .map(|p| p as Arc<dyn PaymentVerifier>),
        ));

        Self {
            ledger,
            provider,
            credit,
            config,
        }
    }
}
