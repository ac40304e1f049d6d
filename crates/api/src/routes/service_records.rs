//! Service record routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use crpms_core::validation::{ValidationError, parse_date, parse_integer, require_text};
use crpms_db::{ServiceRecordInput, ServiceRecordRepository};
use crpms_shared::AppError;
use crpms_shared::types::{IntegerInput, RecordNumber, ServiceCode};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the service record routes (requires session middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/service-records",
            get(list_service_records).post(create_service_record),
        )
        .route(
            "/service-records/{record_number}",
            get(get_service_record)
                .put(update_service_record)
                .delete(delete_service_record),
        )
}

/// Request body for creating or updating a service record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordRequest {
    /// Service date, `YYYY-MM-DD`.
    pub service_date: Option<String>,
    /// Plate number of an existing car.
    pub plate_number: Option<String>,
    /// Code of an existing catalog entry.
    pub service_code: Option<IntegerInput>,
}

impl ServiceRecordRequest {
    fn into_input(self) -> Result<ServiceRecordInput, ValidationError> {
        let service_date = parse_date(
            require_text(self.service_date.as_deref(), "serviceDate")?,
            "serviceDate",
        )?;
        let plate_number = require_text(self.plate_number.as_deref(), "plateNumber")?.to_string();
        let service_code: ServiceCode = match &self.service_code {
            Some(code) => parse_integer(&code.as_text(), "serviceCode")?,
            None => {
                return Err(ValidationError::Missing {
                    field: "serviceCode",
                });
            }
        };

        Ok(ServiceRecordInput {
            service_date,
            plate_number,
            service_code,
        })
    }
}

fn record_number(raw: &str) -> Result<RecordNumber, ValidationError> {
    parse_integer(raw, "recordNumber")
}

/// POST /service-records - Record a service performed on a car.
async fn create_service_record(
    State(state): State<AppState>,
    Json(payload): Json<ServiceRecordRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.into_input()?;
    let plate_number = input.plate_number.clone();

    let number = ServiceRecordRepository::new((*state.db).clone())
        .create(input)
        .await?;

    info!(record_number = %number, plate_number = %plate_number, "Service record added");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Service record added successfully",
            "recordNumber": number,
        })),
    ))
}

/// GET /service-records - List records, newest first.
async fn list_service_records(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let records = ServiceRecordRepository::new((*state.db).clone())
        .list()
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": records,
    })))
}

/// GET /service-records/{record_number} - Fetch one record with details.
async fn get_service_record(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let number = record_number(&raw)?;

    let record = ServiceRecordRepository::new((*state.db).clone())
        .find(number)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("Service record not found".to_string())))?;

    Ok(Json(json!({
        "success": true,
        "data": record,
    })))
}

/// PUT /service-records/{record_number} - Replace a record's date, car and service.
async fn update_service_record(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(payload): Json<ServiceRecordRequest>,
) -> ApiResult<impl IntoResponse> {
    let number = record_number(&raw)?;
    let input = payload.into_input()?;

    ServiceRecordRepository::new((*state.db).clone())
        .update(number, input)
        .await?;

    info!(record_number = %number, "Service record updated");

    Ok(Json(json!({
        "success": true,
        "message": "Service record updated successfully",
    })))
}

/// DELETE /service-records/{record_number} - Delete a record.
async fn delete_service_record(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let number = record_number(&raw)?;

    ServiceRecordRepository::new((*state.db).clone())
        .delete(number)
        .await?;

    info!(record_number = %number, "Service record deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Service record deleted successfully",
    })))
}
