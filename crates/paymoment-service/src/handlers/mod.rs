//! API handlers.

// Allow precision loss in handlers - formatted amounts are well within f64 precision
#![allow(clippy::cast_precision_loss)]

pub mod accounts;
pub mod deposits;
pub mod health;
pub mod payments;
pub mod wallet;
