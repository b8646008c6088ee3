//! Account types for PayMoment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AccountId;

/// A wallet account.
///
/// The account tracks the current balance in minor units plus the owner's
/// email, which the payment provider requires when initializing a deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The account ID.
    pub id: AccountId,

    /// Email address registered with the payment provider.
    pub email: String,

    /// Current balance in minor units.
    pub balance: i64,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account balance last changed.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with the given starting balance.
    #[must_use]
    pub fn new(id: AccountId, email: impl Into<String>, starting_balance: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            balance: starting_balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account can cover a debit of `amount` minor units.
    #[must_use]
    pub fn has_sufficient_funds(&self, amount: i64) -> bool {
        self.balance >= amount
    }
}
