//! `RocksDB` ledger implementation.
//!
//! This module provides the `RocksLedger` implementation of the
//! `LedgerStore` trait.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use paymoment_core::{
    Account, AccountId, LedgerError, Reference, Result, Transaction, TransactionId, TxKind,
    VerificationAttempt,
};

use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::LedgerStore;

/// RocksDB-backed ledger implementation.
pub struct RocksLedger {
    db: Arc<DBWithThreadMode<MultiThreaded>>,

    /// Serializes compound mutations. Held only for the check-and-write of
    /// a commit, never across network I/O.
    commit_lock: Mutex<()>,
}

impl RocksLedger {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| LedgerError::Storage(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "opened ledger database");

        Ok(Self {
            db: Arc::new(db),
            commit_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| LedgerError::Storage(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    fn load_account(&self, account_id: &AccountId) -> Result<Account> {
        self.get_account(account_id)?
            .ok_or_else(|| LedgerError::AccountNotFound {
                account_id: account_id.to_string(),
            })
    }

    fn reference_holder(&self, reference: &Reference) -> Result<Option<TransactionId>> {
        let cf_refs = self.cf(cf::REFERENCES)?;

        let value = self
            .db
            .get_cf(&cf_refs, keys::reference_key(reference))
            .map_err(|e| LedgerError::Storage(e.to_string()))?;

        match value {
            Some(id_bytes) => {
                if id_bytes.len() != 16 {
                    return Err(LedgerError::Storage(format!(
                        "reference index value has {} bytes, expected 16",
                        id_bytes.len()
                    )));
                }
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(&id_bytes);
                Ok(Some(TransactionId::from_bytes(bytes)?))
            }
            None => Ok(None),
        }
    }
}

impl LedgerStore for RocksLedger {
    // =========================================================================
    // Account Operations
    // =========================================================================

    fn create_account(&self, account: &Account) -> Result<()> {
        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(&account.id);

        let _guard = self.commit_lock.lock();

        if self
            .db
            .get_cf(&cf_accounts, &key)
            .map_err(|e| LedgerError::Storage(e.to_string()))?
            .is_some()
        {
            return Err(LedgerError::AccountAlreadyExists {
                account_id: account.id.to_string(),
            });
        }

        let value = Self::serialize(account)?;
        self.db
            .put_cf(&cf_accounts, key, value)
            .map_err(|e| LedgerError::Storage(e.to_string()))?;

        tracing::debug!(account_id = %account.id, "created account");

        Ok(())
    }

    fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>> {
        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(account_id);

        self.db
            .get_cf(&cf_accounts, key)
            .map_err(|e| LedgerError::Storage(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn balance(&self, account_id: &AccountId) -> Result<i64> {
        Ok(self.load_account(account_id)?.balance)
    }

    // =========================================================================
    // Transaction Operations
    // =========================================================================

    fn record_completed(
        &self,
        account_id: &AccountId,
        kind: TxKind,
        amount: i64,
        reference: &Reference,
        description: &str,
    ) -> Result<(Transaction, i64)> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "amount must be positive, got {amount}"
            )));
        }

        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let cf_tx = self.cf(cf::TRANSACTIONS)?;
        let cf_by_account = self.cf(cf::TRANSACTIONS_BY_ACCOUNT)?;
        let cf_refs = self.cf(cf::REFERENCES)?;

        // The uniqueness check and the batch write must observe the same
        // state; concurrent writers serialize on the commit lock.
        let _guard = self.commit_lock.lock();

        if self.reference_holder(reference)?.is_some() {
            return Err(LedgerError::DuplicateReference {
                reference: reference.to_string(),
            });
        }

        let mut account = self.load_account(account_id)?;

        let transaction = Transaction::completed(
            *account_id,
            kind,
            amount,
            reference.clone(),
            description.to_string(),
        );

        let delta = transaction.signed_amount();
        if delta < 0 && !account.has_sufficient_funds(amount) {
            return Err(LedgerError::InsufficientFunds {
                balance: account.balance,
                required: amount,
            });
        }

        account.balance =
            account
                .balance
                .checked_add(delta)
                .ok_or(LedgerError::BalanceOverflow {
                    balance: account.balance,
                    delta,
                })?;
        account.updated_at = chrono::Utc::now();

        let account_key = keys::account_key(account_id);
        let tx_key = keys::transaction_key(&transaction.id);
        let index_key = keys::account_transaction_key(account_id, &transaction.id);
        let reference_key = keys::reference_key(reference);

        let account_value = Self::serialize(&account)?;
        let tx_value = Self::serialize(&transaction)?;

        // Write atomically
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_accounts, &account_key, &account_value);
        batch.put_cf(&cf_tx, &tx_key, &tx_value);
        batch.put_cf(&cf_by_account, &index_key, []);
        batch.put_cf(&cf_refs, &reference_key, transaction.id.to_bytes());

        self.db
            .write(batch)
            .map_err(|e| LedgerError::Storage(e.to_string()))?;

        tracing::debug!(
            account_id = %account_id,
            transaction_id = %transaction.id,
            reference = %reference,
            delta,
            balance = account.balance,
            "recorded completed transaction"
        );

        Ok((transaction, account.balance))
    }

    fn get_transaction(&self, transaction_id: &TransactionId) -> Result<Option<Transaction>> {
        let cf_tx = self.cf(cf::TRANSACTIONS)?;
        let key = keys::transaction_key(transaction_id);

        self.db
            .get_cf(&cf_tx, key)
            .map_err(|e| LedgerError::Storage(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn find_by_reference(&self, reference: &Reference) -> Result<Option<Transaction>> {
        match self.reference_holder(reference)? {
            Some(transaction_id) => self.get_transaction(&transaction_id),
            None => Ok(None),
        }
    }

    fn list_transactions(&self, account_id: &AccountId, limit: usize) -> Result<Vec<Transaction>> {
        let cf_by_account = self.cf(cf::TRANSACTIONS_BY_ACCOUNT)?;
        let prefix = keys::account_transactions_prefix(account_id);

        let iter = self.db.iterator_cf(
            &cf_by_account,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // Collect all matching keys first (ULID keys are naturally time-ordered)
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| LedgerError::Storage(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            all_keys.push(key.to_vec());
        }

        // Reverse to get newest first
        all_keys.reverse();

        let mut transactions = Vec::new();
        for key in all_keys {
            if transactions.len() >= limit {
                break;
            }

            let tx_id = keys::extract_transaction_id(&key);
            if let Some(tx) = self.get_transaction(&tx_id)? {
                transactions.push(tx);
            }
        }

        Ok(transactions)
    }

    // =========================================================================
    // Verification Attempt Operations
    // =========================================================================

    fn record_attempt(&self, attempt: &VerificationAttempt) -> Result<()> {
        let cf_attempts = self.cf(cf::VERIFICATION_ATTEMPTS)?;
        let key = keys::account_attempt_key(&attempt.account_id, &attempt.id);
        let value = Self::serialize(attempt)?;

        self.db
            .put_cf(&cf_attempts, key, value)
            .map_err(|e| LedgerError::Storage(e.to_string()))?;

        Ok(())
    }

    fn list_attempts(
        &self,
        account_id: &AccountId,
        limit: usize,
    ) -> Result<Vec<VerificationAttempt>> {
        let cf_attempts = self.cf(cf::VERIFICATION_ATTEMPTS)?;
        let prefix = keys::account_attempts_prefix(account_id);

        let iter = self.db.iterator_cf(
            &cf_attempts,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        let mut rows: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|e| LedgerError::Storage(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            rows.push(value.to_vec());
        }

        // Reverse to get newest first
        rows.reverse();

        let mut attempts = Vec::new();
        for row in rows {
            if attempts.len() >= limit {
                break;
            }
            attempts.push(Self::deserialize(&row)?);
        }

        Ok(attempts)
    }
}
