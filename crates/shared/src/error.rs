//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure reaches the caller as one of these, rendered with a
/// human-readable message. Nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    /// No valid session.
    #[error("Unauthorized: {0}")]
    Unauthenticated(String),

    /// Referenced plate number, service code, record or user does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or missing required field, non-numeric or negative amount.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Duplicate plate number or username.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated(_) => 401,
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message safe to show to a client.
    ///
    /// Infrastructure failures are replaced with a generic message; their
    /// details only go to the log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Unauthenticated(msg)
            | Self::NotFound(msg)
            | Self::InvalidInput(msg)
            | Self::Conflict(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Returns true for errors caused by the server rather than the request.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}
