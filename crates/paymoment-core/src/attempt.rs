//! Verification attempt audit records.
//!
//! Failed and indeterminate deposit verifications never touch the ledger's
//! unique reference index, so the reference stays free for a legitimate
//! retry. They land here instead, in a non-unique append-only log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, AttemptId, Reference};

/// An audit record of a deposit verification that did not credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationAttempt {
    /// Unique attempt ID (ULID for time-ordering).
    pub id: AttemptId,

    /// The account that submitted the reference.
    pub account_id: AccountId,

    /// The reference that was verified.
    pub reference: Reference,

    /// How the attempt ended.
    pub outcome: AttemptOutcome,

    /// Why the attempt did not credit.
    pub reason: String,

    /// Amount reported by the provider, when the provider answered.
    pub provider_amount: Option<i64>,

    /// Amount claimed by the client, when one was supplied.
    pub claimed_amount: Option<i64>,

    /// When the attempt was recorded.
    pub created_at: DateTime<Utc>,
}

impl VerificationAttempt {
    /// Create an attempt record.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        reference: Reference,
        outcome: AttemptOutcome,
        reason: impl Into<String>,
        provider_amount: Option<i64>,
        claimed_amount: Option<i64>,
    ) -> Self {
        Self {
            id: AttemptId::generate(),
            account_id,
            reference,
            outcome,
            reason: reason.into(),
            provider_amount,
            claimed_amount,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a deposit verification attempt that did not credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Terminal for this reference: the provider reported failure, the
    /// reference is unknown, or the amounts disagreed.
    Rejected,

    /// Not yet decidable: the provider was unreachable or the payment is
    /// still pending. Retrying with the same reference is safe.
    Indeterminate,
}
