//! Deposit initialization and verification handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use paymoment_core::Reference;
use paymoment_store::LedgerStore;

use crate::auth::AuthAccount;
use crate::credit::CreditOutcome;
use crate::error::ApiError;
use crate::handlers::wallet::TransactionResponse;
use crate::state::AppState;

/// Smallest deposit the provider will accept, in minor units.
const MIN_DEPOSIT: i64 = 100;

/// Initialize deposit request.
#[derive(Debug, Deserialize)]
pub struct InitializeDepositRequest {
    /// Amount to deposit, in minor units.
    pub amount: i64,
}

/// Initialize deposit response.
#[derive(Debug, Serialize)]
pub struct InitializeDepositResponse {
    /// Hosted checkout URL to redirect the payer to.
    pub authorization_url: String,
    /// The reference assigned to this payment attempt.
    pub reference: String,
}

/// Initialize a deposit with the payment provider.
///
/// Nothing is recorded in the ledger here; a transaction only exists
/// once verification succeeds.
pub async fn initialize_deposit(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<InitializeDepositRequest>,
) -> Result<Json<InitializeDepositResponse>, ApiError> {
    let provider = state.provider.as_ref().ok_or_else(|| {
        ApiError::ProviderUnavailable("payment provider is not configured".into())
    })?;

    let account = state
        .ledger
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    if body.amount < MIN_DEPOSIT {
        return Err(ApiError::BadRequest(format!(
            "minimum deposit is {MIN_DEPOSIT}"
        )));
    }

    let data = provider
        .initialize(&account.email, body.amount)
        .await
        .map_err(|e| {
            tracing::error!(account_id = %auth.account_id, error = %e, "failed to initialize deposit");
            ApiError::ProviderUnavailable(format!("failed to initialize deposit: {e}"))
        })?;

    tracing::info!(
        account_id = %auth.account_id,
        reference = %data.reference,
        amount = body.amount,
        "deposit initialized"
    );

    Ok(Json(InitializeDepositResponse {
        authorization_url: data.authorization_url,
        reference: data.reference,
    }))
}

/// Verify deposit request.
#[derive(Debug, Deserialize)]
pub struct VerifyDepositRequest {
    /// The payment reference to verify.
    pub reference: String,
    /// The amount the client believes was paid, in minor units. When
    /// present it must match the provider-settled amount exactly.
    pub amount: Option<i64>,
}

/// Verify deposit response.
#[derive(Debug, Serialize)]
pub struct VerifyDepositResponse {
    /// Whether the balance was credited.
    pub credited: bool,
    /// Whether this reference was already credited by an earlier request.
    pub replayed: bool,
    /// Balance after the credit, in minor units.
    pub balance: i64,
    /// The transaction holding the reference.
    pub transaction: TransactionResponse,
}

/// Verify a payment with the provider and credit the wallet.
pub async fn verify_deposit(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<VerifyDepositRequest>,
) -> Result<Json<VerifyDepositResponse>, ApiError> {
    let reference: Reference = body
        .reference
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("{e}")))?;

    let outcome = state
        .credit
        .credit_deposit(auth.account_id, reference, body.amount)
        .await?;

    match outcome {
        CreditOutcome::Credited {
            transaction,
            balance,
            replayed,
        } => Ok(Json(VerifyDepositResponse {
            credited: true,
            replayed,
            balance,
            transaction: TransactionResponse::from(&transaction),
        })),
        CreditOutcome::Rejected { reason } => Err(ApiError::VerificationRejected(reason)),
        CreditOutcome::Indeterminate { reason } => Err(ApiError::ProviderUnavailable(reason)),
    }
}
