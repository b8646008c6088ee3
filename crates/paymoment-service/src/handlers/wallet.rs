//! Wallet balance, transaction history, and audit-log handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paymoment_core::{AttemptOutcome, Transaction, TxKind, TxStatus, VerificationAttempt};
use paymoment_store::LedgerStore;

use crate::auth::AuthAccount;
use crate::error::ApiError;
use crate::handlers::accounts::format_minor;
use crate::state::AppState;

/// Balance response.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Balance in minor units.
    pub balance: i64,
    /// Balance formatted for display.
    pub balance_formatted: String,
}

/// Get the current balance.
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
) -> Result<Json<BalanceResponse>, ApiError> {
    let account = state
        .ledger
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    Ok(Json(BalanceResponse {
        balance: account.balance,
        balance_formatted: format_minor(account.balance),
    }))
}

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Maximum number of entries to return (default: 50, max: 100).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Transaction response.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: String,
    /// Transaction kind.
    pub kind: TxKind,
    /// Transaction status.
    pub status: TxStatus,
    /// Signed amount in minor units (positive = credit, negative = debit).
    pub amount: i64,
    /// The reference held by this transaction.
    pub reference: String,
    /// Description.
    pub description: String,
    /// Timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.to_string(),
            kind: tx.kind,
            status: tx.status,
            amount: tx.signed_amount(),
            reference: tx.reference.to_string(),
            description: tx.description.clone(),
            created_at: tx.created_at,
        }
    }
}

/// List transactions response.
#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    /// Transactions (newest first).
    pub transactions: Vec<TransactionResponse>,
    /// Whether there are more transactions.
    pub has_more: bool,
}

/// List transaction history, newest first.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListTransactionsResponse>, ApiError> {
    // Verify account exists
    state
        .ledger
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(100);
    let transactions = state.ledger.list_transactions(&auth.account_id, limit + 1)?;

    let has_more = transactions.len() > limit;
    let transactions: Vec<_> = transactions
        .iter()
        .take(limit)
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(ListTransactionsResponse {
        transactions,
        has_more,
    }))
}

/// Verification attempt response.
#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    /// The reference that was verified.
    pub reference: String,
    /// Outcome of the attempt.
    pub outcome: AttemptOutcome,
    /// Why the attempt did not credit.
    pub reason: String,
    /// Amount the provider reported, when known.
    pub provider_amount: Option<i64>,
    /// Amount the client claimed, when given.
    pub claimed_amount: Option<i64>,
    /// Timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&VerificationAttempt> for AttemptResponse {
    fn from(attempt: &VerificationAttempt) -> Self {
        Self {
            reference: attempt.reference.to_string(),
            outcome: attempt.outcome,
            reason: attempt.reason.clone(),
            provider_amount: attempt.provider_amount,
            claimed_amount: attempt.claimed_amount,
            created_at: attempt.created_at,
        }
    }
}

/// List verification attempts response.
#[derive(Debug, Serialize)]
pub struct ListAttemptsResponse {
    /// Attempts (newest first).
    pub attempts: Vec<AttemptResponse>,
    /// Whether there are more attempts.
    pub has_more: bool,
}

/// List failed and indeterminate verification attempts, newest first.
pub async fn list_verification_attempts(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListAttemptsResponse>, ApiError> {
    state
        .ledger
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    let limit = query.limit.min(100);
    let attempts = state.ledger.list_attempts(&auth.account_id, limit + 1)?;

    let has_more = attempts.len() > limit;
    let attempts: Vec<_> = attempts
        .iter()
        .take(limit)
        .map(AttemptResponse::from)
        .collect();

    Ok(Json(ListAttemptsResponse { attempts, has_more }))
}
