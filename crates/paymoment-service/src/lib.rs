//! PayMoment HTTP API Service.
//!
//! This crate provides the HTTP API for the PayMoment wallet ledger,
//! including:
//!
//! - Account registration and lookup
//! - Wallet balance and transaction history
//! - Deposit initialization and verify-then-credit
//! - Service payments (debits)
//!
//! # Authentication
//!
//! Every route except `/health` requires a bearer JWT issued by the
//! identity service and signed with the shared HS256 secret; the `sub`
//! claim is the account id.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers must be async for routing

pub mod auth;
pub mod config;
pub mod credit;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use credit::{CreditOutcome, CreditService};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
