//! `RocksDB` ledger storage for PayMoment.
//!
//! This crate provides persistent storage for accounts, transactions, and
//! verification attempts using `RocksDB` with column families for efficient
//! indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `accounts`: Primary account records, keyed by `account_id`
//! - `transactions`: Ledger transactions, keyed by `transaction_id` (ULID)
//! - `transactions_by_account`: Index for listing transactions by account
//! - `references`: Reference uniqueness index, keyed by reference bytes;
//!   the presence of a key is the idempotency constraint
//! - `verification_attempts`: Non-unique audit log of deposit verifications
//!   that did not credit
//!
//! # Atomicity
//!
//! [`LedgerStore::record_completed`] is the ledger's serialization point:
//! the reference-uniqueness check, the transaction insert, and the balance
//! update are applied as a single `WriteBatch` under an internal commit
//! lock. No network I/O ever happens under that lock.
//!
//! # Example
//!
//! ```no_run
//! use paymoment_core::{Account, AccountId};
//! use paymoment_store::{LedgerStore, RocksLedger};
//!
//! let ledger = RocksLedger::open("/tmp/paymoment-db").unwrap();
//!
//! let account_id = AccountId::generate();
//! let account = Account::new(account_id, "ada@example.com", 0);
//! ledger.create_account(&account).unwrap();
//!
//! let balance = ledger.balance(&account_id).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod keys;
pub mod rocks;
pub mod schema;

pub use rocks::RocksLedger;

use paymoment_core::{
    Account, AccountId, Reference, Result, Transaction, TransactionId, TxKind, VerificationAttempt,
};

/// The ledger storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing).
pub trait LedgerStore: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Create a new account record.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountAlreadyExists` if the account ID is
    /// already registered, or an error if the database operation fails.
    fn create_account(&self, account: &Account) -> Result<()>;

    /// Get an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>>;

    /// Get the current balance of an account, in minor units.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if the account doesn't exist.
    fn balance(&self, account_id: &AccountId) -> Result<i64>;

    // =========================================================================
    // Transaction Operations
    // =========================================================================

    /// Record a completed transaction and apply its balance change.
    ///
    /// This is the ledger's serialization point. Atomically: (a) fails if
    /// any transaction already holds `reference`; (b) inserts the
    /// transaction with `Completed` status; (c) applies the signed amount
    /// to the stored balance, after a sufficient-funds check for debits.
    /// Either all three happen or none do.
    ///
    /// Returns the recorded transaction and the new balance.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidAmount` if `amount` is not positive.
    /// - `LedgerError::DuplicateReference` if the reference is taken.
    /// - `LedgerError::AccountNotFound` if the account doesn't exist.
    /// - `LedgerError::InsufficientFunds` if a debit exceeds the balance.
    fn record_completed(
        &self,
        account_id: &AccountId,
        kind: TxKind,
        amount: i64,
        reference: &Reference,
        description: &str,
    ) -> Result<(Transaction, i64)>;

    /// Get a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_transaction(&self, transaction_id: &TransactionId) -> Result<Option<Transaction>>;

    /// Find the transaction holding a reference, if any.
    ///
    /// This is what turns a `DuplicateReference` into an idempotent-replay
    /// response: the caller fetches the already-recorded transaction
    /// instead of re-applying the credit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_by_reference(&self, reference: &Reference) -> Result<Option<Transaction>>;

    /// List transactions for an account, newest first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_transactions(&self, account_id: &AccountId, limit: usize) -> Result<Vec<Transaction>>;

    // =========================================================================
    // Verification Attempt Operations (audit)
    // =========================================================================

    /// Append a verification attempt to the audit log.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn record_attempt(&self, attempt: &VerificationAttempt) -> Result<()>;

    /// List verification attempts for an account, newest first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_attempts(
        &self,
        account_id: &AccountId,
        limit: usize,
    ) -> Result<Vec<VerificationAttempt>>;
}
