//! Car routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use crpms_core::validation::{optional_text, parse_integer, require_text};
use crpms_db::{CarRepository, NewCar};
use crpms_shared::AppError;
use crpms_shared::types::IntegerInput;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the car routes (requires session middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/{plate_number}", get(get_car))
}

/// Request body for registering a car.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    /// Plate number (required, unique).
    pub plate_number: Option<String>,
    /// Car type.
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    /// Car model.
    #[serde(rename = "model")]
    pub car_model: Option<String>,
    /// Manufacturing year, as a number or numeric string.
    pub manufacturing_year: Option<IntegerInput>,
    /// Driver phone.
    pub driver_phone: Option<String>,
    /// Mechanic responsible for the car.
    pub mechanic_name: Option<String>,
}

impl CreateCarRequest {
    fn into_new_car(self) -> Result<NewCar, ApiError> {
        let plate_number = require_text(self.plate_number.as_deref(), "plateNumber")?.to_string();

        let manufacturing_year = match self.manufacturing_year {
            Some(year) if !year.as_text().trim().is_empty() => {
                Some(parse_integer::<i32>(&year.as_text(), "manufacturingYear")?)
            }
            _ => None,
        };

        Ok(NewCar {
            plate_number,
            car_type: optional_text(self.car_type.as_deref()),
            car_model: optional_text(self.car_model.as_deref()),
            manufacturing_year,
            driver_phone: optional_text(self.driver_phone.as_deref()),
            mechanic_name: optional_text(self.mechanic_name.as_deref()),
        })
    }
}

/// POST /cars - Register a car.
async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<CreateCarRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.into_new_car()?;

    let car = CarRepository::new((*state.db).clone())
        .create(input)
        .await?;

    info!(plate_number = %car.plate_number, "Car registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Car added successfully",
            "plateNumber": car.plate_number,
        })),
    ))
}

/// GET /cars - List cars, newest first.
async fn list_cars(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let cars = CarRepository::new((*state.db).clone()).list().await?;

    Ok(Json(json!({
        "success": true,
        "data": cars,
    })))
}

/// GET /cars/{plate_number} - Fetch one car.
async fn get_car(
    State(state): State<AppState>,
    Path(plate_number): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let car = CarRepository::new((*state.db).clone())
        .find(&plate_number)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("Car not found".to_string())))?;

    Ok(Json(json!({
        "success": true,
        "data": car,
    })))
}
