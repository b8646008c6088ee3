//! Paystack API types.

use serde::{Deserialize, Serialize};

/// Envelope every Paystack response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the API call itself succeeded.
    pub status: bool,

    /// Human-readable message.
    pub message: String,

    /// Payload, present on success.
    pub data: Option<T>,
}

/// Request body for `POST /transaction/initialize`.
#[derive(Debug, Clone, Serialize)]
pub struct InitializeRequest {
    /// Customer email address.
    pub email: String,

    /// Amount in minor units.
    pub amount: i64,
}

/// Data returned by `POST /transaction/initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeData {
    /// URL the customer is redirected to for the hosted checkout.
    pub authorization_url: String,

    /// One-time access code for the hosted checkout.
    pub access_code: String,

    /// Reference the provider assigned to this payment attempt.
    pub reference: String,
}

/// Data returned by `GET /transaction/verify/{reference}`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyData {
    /// Provider-side status string: `success`, `failed`, `abandoned`, ...
    pub status: String,

    /// Amount in minor units.
    pub amount: i64,

    /// Reference this record belongs to.
    pub reference: String,

    /// Gateway response detail, when present.
    pub gateway_response: Option<String>,

    /// Paying customer, when known.
    pub customer: Option<CustomerData>,
}

/// Customer block inside a verification payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerData {
    /// Customer email address.
    pub email: Option<String>,
}
