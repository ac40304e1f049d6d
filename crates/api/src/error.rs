//! Rendering of errors as JSON responses.
//!
//! Every failure leaves the API as
//! `{"success": false, "error": CODE, "message": text}` with the status
//! carried by [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crpms_core::auth::{PasswordError, PasswordPolicyError};
use crpms_core::billing::BillingError;
use crpms_core::validation::ValidationError;
use crpms_db::RepositoryError;
use crpms_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// Handler error: an [`AppError`] that renders itself as a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 401 with the standard login prompt.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self(AppError::Unauthenticated(
            "Unauthorized. Please login first.".to_string(),
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(err) = self;

        if err.is_server_error() {
            error!(error = %err, "Request failed");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "success": false,
            "error": err.error_code(),
            "message": err.public_message(),
        }));

        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(AppError::InvalidInput(err.to_string()))
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self(AppError::InvalidInput(err.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::CarNotFound(_) => Self(AppError::NotFound("Car not found".to_string())),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let app = match err {
            RepositoryError::CarNotFound(_) => AppError::NotFound("Car not found".to_string()),
            RepositoryError::ServiceNotFound(_) => {
                AppError::NotFound("Service not found".to_string())
            }
            RepositoryError::RecordNotFound(_) => {
                AppError::NotFound("Service record not found".to_string())
            }
            RepositoryError::DuplicateCar(_) => {
                AppError::Conflict("Car with this plate number already exists".to_string())
            }
            RepositoryError::UsernameTaken(_) => {
                AppError::Conflict("Username already exists".to_string())
            }
            RepositoryError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(app)
    }
}
