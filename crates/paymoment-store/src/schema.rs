//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary account records, keyed by `account_id`.
    pub const ACCOUNTS: &str = "accounts";

    /// Ledger transactions, keyed by `transaction_id` (ULID).
    pub const TRANSACTIONS: &str = "transactions";

    /// Index: transactions by account, keyed by `account_id || transaction_id`.
    /// Value is empty (index only).
    pub const TRANSACTIONS_BY_ACCOUNT: &str = "transactions_by_account";

    /// Reference uniqueness index, keyed by reference bytes.
    /// Value is the owning `transaction_id`; the presence of a key is the
    /// idempotency constraint.
    pub const REFERENCES: &str = "references";

    /// Verification attempt audit log, keyed by `account_id || attempt_id`.
    /// Value is the serialized attempt record.
    pub const VERIFICATION_ATTEMPTS: &str = "verification_attempts";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::ACCOUNTS,
        cf::TRANSACTIONS,
        cf::TRANSACTIONS_BY_ACCOUNT,
        cf::REFERENCES,
        cf::VERIFICATION_ATTEMPTS,
    ]
}
