//! The verify-then-credit orchestrator.
//!
//! `CreditService` owns the only path from an external payment to a
//! balance increase. Verification happens with no locks held; the ledger
//! write that follows a successful verification is detached onto the
//! blocking pool, so a client disconnect cannot abort it. Failed and
//! indeterminate verifications record nothing in the transaction table,
//! leaving the reference free for a retry; they land in the audit log
//! instead.

use std::sync::Arc;

use paymoment_core::{
    AccountId, AttemptOutcome, LedgerError, Reference, Result, Transaction, TxKind,
    VerificationAttempt,
};
use paymoment_gateway::{GatewayError, PaymentStatus, PaymentVerifier};
use paymoment_store::LedgerStore;

/// Outcome of a deposit credit attempt.
#[derive(Debug)]
pub enum CreditOutcome {
    /// The payment verified successfully and the balance increased.
    Credited {
        /// The transaction holding the reference.
        transaction: Transaction,
        /// Balance after the credit, in minor units.
        balance: i64,
        /// Whether this reference was already credited by an earlier
        /// request; the original transaction is returned unchanged.
        replayed: bool,
    },

    /// The payment is definitively not creditable. Retrying the same
    /// reference cannot succeed unless provider state changes.
    Rejected {
        /// Why the verification was rejected.
        reason: String,
    },

    /// No verdict could be reached; the client may retry with the same
    /// reference.
    Indeterminate {
        /// Why no verdict was reached.
        reason: String,
    },
}

/// Orchestrates payment verification and ledger writes.
pub struct CreditService {
    ledger: Arc<dyn LedgerStore>,
    verifier: Option<Arc<dyn PaymentVerifier>>,
}

impl CreditService {
    /// Create a new credit service.
    ///
    /// Without a verifier every deposit attempt is indeterminate; debits
    /// keep working.
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerStore>, verifier: Option<Arc<dyn PaymentVerifier>>) -> Self {
        Self { ledger, verifier }
    }

    /// Verify a payment with the provider and credit the account.
    ///
    /// `claimed_amount` is the amount the client believes was paid; when
    /// present it must equal the provider-settled amount exactly, or the
    /// deposit is rejected.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if the account is absent,
    /// or a storage error if the write fails. Verification verdicts are
    /// not errors; they come back as `CreditOutcome`.
    pub async fn credit_deposit(
        &self,
        account_id: AccountId,
        reference: Reference,
        claimed_amount: Option<i64>,
    ) -> Result<CreditOutcome> {
        if self.ledger.get_account(&account_id)?.is_none() {
            return Err(LedgerError::AccountNotFound {
                account_id: account_id.to_string(),
            });
        }

        let Some(verifier) = self.verifier.as_deref() else {
            return Ok(self.indeterminate(
                account_id,
                &reference,
                "payment provider is not configured",
                None,
                claimed_amount,
            ));
        };

        // Suspension point: no locks are held across this call.
        let verification = match verifier.verify(&reference).await {
            Ok(v) => v,
            Err(GatewayError::Unavailable(msg)) => {
                return Ok(self.indeterminate(
                    account_id,
                    &reference,
                    &format!("provider unavailable: {msg}"),
                    None,
                    claimed_amount,
                ));
            }
            Err(GatewayError::UnknownReference { .. }) => {
                return Ok(self.rejected(
                    account_id,
                    &reference,
                    "provider has no record of this reference",
                    None,
                    claimed_amount,
                ));
            }
            Err(GatewayError::Api { status, message }) => {
                return Ok(self.indeterminate(
                    account_id,
                    &reference,
                    &format!("provider error ({status}): {message}"),
                    None,
                    claimed_amount,
                ));
            }
        };

        match verification.status {
            PaymentStatus::Failed => {
                return Ok(self.rejected(
                    account_id,
                    &reference,
                    "payment did not succeed at the provider",
                    Some(verification.amount),
                    claimed_amount,
                ));
            }
            PaymentStatus::Pending => {
                return Ok(self.indeterminate(
                    account_id,
                    &reference,
                    "payment is not concluded at the provider",
                    Some(verification.amount),
                    claimed_amount,
                ));
            }
            PaymentStatus::Success => {}
        }

        if let Some(claimed) = claimed_amount {
            if claimed != verification.amount {
                return Ok(self.rejected(
                    account_id,
                    &reference,
                    &format!(
                        "amount mismatch: provider settled {} but client claimed {claimed}",
                        verification.amount
                    ),
                    Some(verification.amount),
                    claimed_amount,
                ));
            }
        }

        let amount = verification.amount;
        let description = verification.payer_email.as_deref().map_or_else(
            || "wallet deposit".to_string(),
            |email| format!("wallet deposit by {email}"),
        );

        // Detached from this future: once the provider has confirmed the
        // payment, a client disconnect must not abort the ledger write.
        let ledger = Arc::clone(&self.ledger);
        let write_reference = reference.clone();
        let write = tokio::task::spawn_blocking(move || {
            ledger.record_completed(
                &account_id,
                TxKind::Deposit,
                amount,
                &write_reference,
                &description,
            )
        });

        match write.await {
            Ok(Ok((transaction, balance))) => {
                tracing::info!(
                    account_id = %account_id,
                    reference = %reference,
                    amount,
                    balance,
                    "deposit credited"
                );
                Ok(CreditOutcome::Credited {
                    transaction,
                    balance,
                    replayed: false,
                })
            }
            Ok(Err(LedgerError::DuplicateReference { .. })) => {
                self.replay(account_id, &reference, amount, claimed_amount)
            }
            Ok(Err(e)) => Err(e),
            Err(e) => Err(LedgerError::Storage(format!("ledger write task failed: {e}"))),
        }
    }

    /// Debit the balance for a service charge.
    ///
    /// A fresh reference is generated for the transaction; unlike deposit
    /// references it is not a client-supplied idempotency key.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidKind` if `kind` does not debit the balance.
    /// - `LedgerError::InvalidAmount` if `amount` is not positive.
    /// - `LedgerError::InsufficientFunds` if the balance cannot cover the
    ///   debit; the balance is untouched.
    pub fn debit_for_service(
        &self,
        account_id: AccountId,
        kind: TxKind,
        amount: i64,
        description: &str,
    ) -> Result<(Transaction, i64)> {
        if !kind.is_debit() {
            return Err(LedgerError::InvalidKind(
                format!("{kind:?} does not debit the balance").to_lowercase(),
            ));
        }

        let reference = Reference::generated(kind.reference_prefix());
        let (transaction, balance) =
            self.ledger
                .record_completed(&account_id, kind, amount, &reference, description)?;

        tracing::info!(
            account_id = %account_id,
            reference = %reference,
            kind = ?kind,
            amount,
            balance,
            "service debit recorded"
        );

        Ok((transaction, balance))
    }

    /// Resolve a `DuplicateReference` from the commit into a verdict.
    fn replay(
        &self,
        account_id: AccountId,
        reference: &Reference,
        provider_amount: i64,
        claimed_amount: Option<i64>,
    ) -> Result<CreditOutcome> {
        match self.ledger.find_by_reference(reference)? {
            Some(existing) if existing.account_id == account_id => {
                let balance = self.ledger.balance(&account_id)?;
                tracing::info!(
                    account_id = %account_id,
                    reference = %reference,
                    "deposit replayed"
                );
                Ok(CreditOutcome::Credited {
                    transaction: existing,
                    balance,
                    replayed: true,
                })
            }
            Some(_) => Ok(self.rejected(
                account_id,
                reference,
                "reference already consumed by another account",
                Some(provider_amount),
                claimed_amount,
            )),
            None => Err(LedgerError::Storage(format!(
                "reference {reference} is held but its transaction is missing"
            ))),
        }
    }

    fn rejected(
        &self,
        account_id: AccountId,
        reference: &Reference,
        reason: &str,
        provider_amount: Option<i64>,
        claimed_amount: Option<i64>,
    ) -> CreditOutcome {
        self.log_attempt(
            account_id,
            reference,
            AttemptOutcome::Rejected,
            reason,
            provider_amount,
            claimed_amount,
        );
        CreditOutcome::Rejected {
            reason: reason.to_string(),
        }
    }

    fn indeterminate(
        &self,
        account_id: AccountId,
        reference: &Reference,
        reason: &str,
        provider_amount: Option<i64>,
        claimed_amount: Option<i64>,
    ) -> CreditOutcome {
        self.log_attempt(
            account_id,
            reference,
            AttemptOutcome::Indeterminate,
            reason,
            provider_amount,
            claimed_amount,
        );
        CreditOutcome::Indeterminate {
            reason: reason.to_string(),
        }
    }

    /// Best effort: an audit-log failure never fails the request.
    fn log_attempt(
        &self,
        account_id: AccountId,
        reference: &Reference,
        outcome: AttemptOutcome,
        reason: &str,
        provider_amount: Option<i64>,
        claimed_amount: Option<i64>,
    ) {
        let attempt = VerificationAttempt::new(
            account_id,
            reference.clone(),
            outcome,
            reason,
            provider_amount,
            claimed_amount,
        );
        if let Err(e) = self.ledger.record_attempt(&attempt) {
            tracing::warn!(
                account_id = %account_id,
                reference = %reference,
                error = %e,
                "failed to record verification attempt"
            );
        }
    }
}
