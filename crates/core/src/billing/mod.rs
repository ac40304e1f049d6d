//! Billing aggregation.
//!
//! Turns flat service-record and payment rows into the two derived views
//! the workshop works from:
//! - Daily Report (per-car summary for one calendar date)
//! - Invoice (a car's full service and payment history with its balance)
//!
//! Both are computed fresh per request and never persisted.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BillingError;
pub use service::BillingService;
pub use types::*;
