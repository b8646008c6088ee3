//! Account management handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paymoment_core::Account;
use paymoment_store::LedgerStore;

use crate::auth::AuthAccount;
use crate::error::ApiError;
use crate::state::AppState;

/// Account response.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub account_id: String,
    /// Email on record.
    pub email: String,
    /// Current balance in minor units.
    pub balance: i64,
    /// Balance formatted for display.
    pub balance_formatted: String,
    /// Created timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id.to_string(),
            email: account.email.clone(),
            balance: account.balance,
            balance_formatted: format_minor(account.balance),
            created_at: account.created_at,
        }
    }
}

/// Format a minor-unit amount for display.
pub(crate) fn format_minor(amount: i64) -> String {
    format!("\u{20a6}{:.2}", amount as f64 / 100.0)
}

/// Create account request.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Email address for the wallet account.
    pub email: String,
}

/// Register the authenticated subject's wallet account.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
    Json(body): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("a valid email is required".into()));
    }

    let account = Account::new(auth.account_id, email, state.config.signup_bonus);
    state.ledger.create_account(&account)?;

    tracing::info!(
        account_id = %auth.account_id,
        starting_balance = account.balance,
        "account created"
    );

    Ok(Json(AccountResponse::from(&account)))
}

/// Get the current account.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    auth: AuthAccount,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .ledger
        .get_account(&auth.account_id)?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;

    Ok(Json(AccountResponse::from(&account)))
}
