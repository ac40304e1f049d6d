//! Billing error types.

use thiserror::Error;

/// Errors that can occur while building a billing view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Invoice requested for a plate number the store does not know.
    #[error("Car not found: {0}")]
    CarNotFound(String),
}
