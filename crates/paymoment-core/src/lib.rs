//! Core types and utilities for PayMoment.
//!
//! This crate provides the foundational types used throughout the PayMoment
//! wallet platform:
//!
//! - **Identifiers**: `AccountId`, `TransactionId`, `AttemptId`, `Reference`
//! - **Accounts**: `Account`
//! - **Transactions**: `Transaction`, `TxKind`, `TxStatus`, `Direction`
//! - **Audit**: `VerificationAttempt`, `AttemptOutcome`
//!
//! # Monetary unit
//!
//! All amounts are `i64` minor units: a deposit of NGN 50.00 is stored as
//! `5000` kobo. Integer minor units keep balance arithmetic exact, so the
//! amount-match check on deposit verification is plain `i64` equality.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod attempt;
pub mod error;
pub mod ids;
pub mod transaction;

pub use account::Account;
pub use attempt::{AttemptOutcome, VerificationAttempt};
pub use error::{LedgerError, Result};
pub use ids::{AccountId, AttemptId, IdError, Reference, TransactionId, MAX_REFERENCE_LEN};
pub use transaction::{Direction, Transaction, TxKind, TxStatus};
