//! Service payment handlers (debits).

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use paymoment_core::TxKind;

use crate::auth::AuthAccount;
use crate::error::ApiError;
use crate::handlers::wallet::TransactionResponse;
use crate::state::AppState;

/// Payment request.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    /// Transaction kind; must be a debit kind
    /// (withdrawal/transfer/payment).
    pub kind: TxKind,
    /// Amount to debit, in minor units.
    pub amount: i64,
    /// What the debit pays for (e.g. "electricity").
    pub description: String,
}

/// Payment response.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// The recorded transaction.
    pub transaction: TransactionResponse,
    /// Balance after the debit, in minor units.
    pub balance: i64,
}

/// Debit the wallet for a service charge.
pub async fn pay_for_service(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let description = body.description.trim();
    if description.is_empty() {
        return Err(ApiError::BadRequest("a description is required".into()));
    }

    let (transaction, balance) =
        state
            .credit
            .debit_for_service(auth.account_id, body.kind, body.amount, description)?;

    Ok(Json(PaymentResponse {
        transaction: TransactionResponse::from(&transaction),
        balance,
    }))
}
