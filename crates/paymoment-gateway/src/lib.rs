//! Paystack payment gateway client for PayMoment.
//!
//! This crate is the seam between the wallet and the external payment
//! provider. It provides:
//!
//! - [`PaystackClient`]: a typed `reqwest` client for the provider's
//!   `POST /transaction/initialize` and `GET /transaction/verify/{reference}`
//!   endpoints
//! - [`PaymentVerifier`]: the trait the balance credit path consumes, so
//!   tests can substitute a scripted verifier
//!
//! # Failure taxonomy
//!
//! A network error, timeout, or provider 5xx says nothing about the
//! payment's true state and surfaces as [`GatewayError::Unavailable`];
//! callers must treat it as indeterminate, never as payment failure. A
//! provider 404 for a reference is a definitive
//! [`GatewayError::UnknownReference`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;
pub mod types;

pub use client::PaystackClient;
pub use error::GatewayError;

use async_trait::async_trait;
use paymoment_core::Reference;

/// Provider-side view of one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Status reported by the provider.
    pub status: PaymentStatus,

    /// Amount in minor units. Authoritative when `status` is `Success`.
    pub amount: i64,

    /// Email of the paying customer, when the provider knows it.
    pub payer_email: Option<String>,
}

/// Status of a payment as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// The payment completed; the reported amount is authoritative.
    Success,

    /// The payment definitively failed.
    Failed,

    /// The payment has not reached a terminal state yet.
    Pending,
}

/// The verification seam consumed by the balance credit path.
#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    /// Ask the provider whether `reference` corresponds to a genuinely
    /// completed payment, and for how much.
    ///
    /// # Errors
    ///
    /// - `GatewayError::Unavailable` when the provider cannot be reached
    ///   or answers with a server error; the payment state is unknown.
    /// - `GatewayError::UnknownReference` when the provider does not know
    ///   the reference.
    /// - `GatewayError::Api` for other provider-reported errors.
    async fn verify(&self, reference: &Reference) -> Result<Verification, GatewayError>;
}
