//! Error type shared by the repositories.

use crpms_shared::types::{RecordNumber, ServiceCode};
use sea_orm::{DbErr, SqlErr};

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No car with this plate number.
    #[error("Car not found: {0}")]
    CarNotFound(String),

    /// No catalog entry with this service code.
    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceCode),

    /// No service record with this number.
    #[error("Service record not found: {0}")]
    RecordNotFound(RecordNumber),

    /// Plate number already registered.
    #[error("Car with plate number {0} already exists")]
    DuplicateCar(String),

    /// Username already registered.
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Returns true if the error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Returns true if the error is a foreign key violation.
pub(crate) fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
