//! Transaction types for PayMoment.
//!
//! Every balance change is a transaction row. Rows are append-only: once
//! recorded they are never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Reference, TransactionId};

/// A ledger transaction representing a balance change.
///
/// Transactions use ULIDs for time-ordered IDs and carry the unique payment
/// reference that makes the credit path idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID (ULID for time-ordering).
    pub id: TransactionId,

    /// The account whose balance was affected.
    pub account_id: AccountId,

    /// Kind of balance change.
    pub kind: TxKind,

    /// Processing status. The ledger records only `Completed` rows.
    pub status: TxStatus,

    /// Amount in minor units, always positive; `kind` determines the sign
    /// of the balance change.
    pub amount: i64,

    /// Unique payment reference (the idempotency key).
    pub reference: Reference,

    /// Human-readable description.
    pub description: String,

    /// When the transaction was recorded.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a completed transaction record.
    #[must_use]
    pub fn completed(
        account_id: AccountId,
        kind: TxKind,
        amount: i64,
        reference: Reference,
        description: String,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            account_id,
            kind,
            status: TxStatus::Completed,
            amount,
            reference,
            description,
            created_at: Utc::now(),
        }
    }

    /// The signed balance delta this transaction applies, in minor units.
    #[must_use]
    pub fn signed_amount(&self) -> i64 {
        match self.kind.direction() {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}

/// Kind of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    /// Funds deposited through the payment provider.
    Deposit,

    /// Funds withdrawn from the wallet.
    Withdrawal,

    /// Funds transferred to another wallet.
    Transfer,

    /// Payment for a service (bills, airtime, and similar).
    Payment,
}

impl TxKind {
    /// The direction this kind moves the balance.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::Deposit => Direction::Credit,
            Self::Withdrawal | Self::Transfer | Self::Payment => Direction::Debit,
        }
    }

    /// Check if this kind adds funds (positive balance change).
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        matches!(self.direction(), Direction::Credit)
    }

    /// Check if this kind removes funds (negative balance change).
    #[must_use]
    pub const fn is_debit(&self) -> bool {
        matches!(self.direction(), Direction::Debit)
    }

    /// Short uppercase prefix used when generating references for
    /// internally-originated transactions.
    #[must_use]
    pub const fn reference_prefix(&self) -> &'static str {
        match self {
            Self::Deposit => "DEP",
            Self::Withdrawal => "WDL",
            Self::Transfer => "TRF",
            Self::Payment => "PMT",
        }
    }
}

/// Direction of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Balance increases.
    Credit,

    /// Balance decreases.
    Debit,
}

/// Processing status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    /// Awaiting provider confirmation.
    Pending,

    /// Confirmed and applied to the balance.
    Completed,

    /// Definitively failed; never applied to the balance.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_is_the_only_credit_kind() {
        assert!(TxKind::Deposit.is_credit());
        assert!(!TxKind::Withdrawal.is_credit());
        assert!(!TxKind::Transfer.is_credit());
        assert!(!TxKind::Payment.is_credit());

        assert!(TxKind::Payment.is_debit());
        assert!(!TxKind::Deposit.is_debit());
    }

    #[test]
    fn signed_amount_follows_direction() {
        let account_id = AccountId::generate();
        let deposit = Transaction::completed(
            account_id,
            TxKind::Deposit,
            2000,
            Reference::new("R1").unwrap(),
            "Wallet deposit".into(),
        );
        let payment = Transaction::completed(
            account_id,
            TxKind::Payment,
            300,
            Reference::generated(TxKind::Payment.reference_prefix()),
            "Electricity bill".into(),
        );

        assert_eq!(deposit.signed_amount(), 2000);
        assert_eq!(payment.signed_amount(), -300);
    }

    #[test]
    fn completed_constructor_sets_status() {
        let tx = Transaction::completed(
            AccountId::generate(),
            TxKind::Deposit,
            2000,
            Reference::new("R1").unwrap(),
            "Wallet deposit".into(),
        );
        assert_eq!(tx.status, TxStatus::Completed);
        assert_eq!(tx.amount, 2000);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&TxKind::Withdrawal).unwrap();
        assert_eq!(json, "\"withdrawal\"");
        let parsed: TxKind = serde_json::from_str("\"deposit\"").unwrap();
        assert_eq!(parsed, TxKind::Deposit);
    }
}
