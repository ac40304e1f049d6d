//! Service catalog routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use crpms_core::validation::{ValidationError, parse_amount, parse_integer, require_text};
use crpms_db::ServiceCatalogRepository;
use crpms_db::entities::services;
use crpms_shared::AppError;
use crpms_shared::types::{AmountInput, ServiceCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the service catalog routes (requires session middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route("/services/{service_code}", get(get_service))
}

/// Request body for adding a catalog entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    /// Service name.
    pub service_name: Option<String>,
    /// Price, as a number or numeric string.
    pub service_price: Option<AmountInput>,
}

/// A catalog entry as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    /// Service code.
    pub service_code: ServiceCode,
    /// Service name.
    pub service_name: String,
    /// Price.
    #[serde(with = "rust_decimal::serde::float")]
    pub service_price: Decimal,
}

impl From<services::Model> for ServiceEntry {
    fn from(model: services::Model) -> Self {
        Self {
            service_code: ServiceCode(model.service_code),
            service_name: model.service_name,
            service_price: model.service_price,
        }
    }
}

/// POST /services - Add a catalog entry.
async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateServiceRequest>,
) -> ApiResult<impl IntoResponse> {
    let service_name = require_text(payload.service_name.as_deref(), "serviceName")?;
    let service_price = payload
        .service_price
        .as_ref()
        .ok_or(ValidationError::Missing {
            field: "servicePrice",
        })
        .and_then(|raw| parse_amount(&raw.as_text(), "servicePrice"))?;

    let service = ServiceCatalogRepository::new((*state.db).clone())
        .create(service_name, service_price)
        .await?;

    info!(
        service_code = service.service_code,
        service_name = %service.service_name,
        "Service added"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Service added successfully",
            "serviceCode": service.service_code,
        })),
    ))
}

/// GET /services - List the catalog by name.
async fn list_services(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let services: Vec<ServiceEntry> = ServiceCatalogRepository::new((*state.db).clone())
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(json!({
        "success": true,
        "data": services,
    })))
}

/// GET /services/{service_code} - Fetch one catalog entry.
async fn get_service(
    State(state): State<AppState>,
    Path(service_code): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let code: ServiceCode = parse_integer(&service_code, "serviceCode")?;

    let service = ServiceCatalogRepository::new((*state.db).clone())
        .find(code)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("Service not found".to_string())))?;

    Ok(Json(json!({
        "success": true,
        "data": ServiceEntry::from(service),
    })))
}
