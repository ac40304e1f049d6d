//! Payment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use crpms_core::validation::{ValidationError, parse_amount, parse_date, require_text};
use crpms_db::PaymentRepository;
use crpms_shared::types::AmountInput;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the payment routes (requires session middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/car/{plate_number}", get(list_payments_for_car))
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Amount, as a number or numeric string.
    pub amount_paid: Option<AmountInput>,
    /// Payment date, `YYYY-MM-DD`.
    pub payment_date: Option<String>,
    /// Plate number of an existing car.
    pub plate_number: Option<String>,
}

/// POST /payments - Record a payment.
async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentRequest>,
) -> ApiResult<impl IntoResponse> {
    let amount_paid = payload
        .amount_paid
        .as_ref()
        .ok_or(ValidationError::Missing {
            field: "amountPaid",
        })
        .and_then(|raw| parse_amount(&raw.as_text(), "amountPaid"))?;
    let payment_date = parse_date(
        require_text(payload.payment_date.as_deref(), "paymentDate")?,
        "paymentDate",
    )?;
    let plate_number = require_text(payload.plate_number.as_deref(), "plateNumber")?;

    let number = PaymentRepository::new((*state.db).clone())
        .create(amount_paid, payment_date, plate_number)
        .await?;

    info!(
        payment_number = %number,
        plate_number = %plate_number,
        amount_paid = %amount_paid,
        "Payment recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Payment added successfully",
            "paymentNumber": number,
        })),
    ))
}

/// GET /payments - List payments, newest first.
async fn list_payments(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let payments = PaymentRepository::new((*state.db).clone()).list().await?;

    Ok(Json(json!({
        "success": true,
        "data": payments,
    })))
}

/// GET /payments/car/{plate_number} - Payments of one car, newest first.
async fn list_payments_for_car(
    State(state): State<AppState>,
    Path(plate_number): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let payments = PaymentRepository::new((*state.db).clone())
        .list_for_car(&plate_number)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": payments,
    })))
}
