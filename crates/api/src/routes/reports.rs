//! Report routes: the daily operations report and the per-car bill.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use crpms_core::billing::BillingService;
use crpms_core::validation::{parse_date, require_text};
use crpms_db::ReportRepository;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// Creates the report routes (requires session middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/daily", get(daily_report))
        .route("/reports/bills/{plate_number}", get(bill))
}

/// Query parameters for the daily report.
#[derive(Debug, Deserialize)]
pub struct DailyReportQuery {
    /// Report date, `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// GET /reports/daily?date=YYYY-MM-DD - Services and payments of one day, by car.
async fn daily_report(
    State(state): State<AppState>,
    Query(query): Query<DailyReportQuery>,
) -> ApiResult<impl IntoResponse> {
    let date = parse_date(require_text(query.date.as_deref(), "date")?, "date")?;

    let reports = ReportRepository::new((*state.db).clone());
    let services = reports.service_records_for_date(date).await?;
    let payments = reports.payments_for_date(date).await?;

    let report = BillingService::build_daily_report(date, services, payments);

    info!(
        %date,
        cars = report.cars.len(),
        net_amount = %report.summary.net_amount,
        "Daily report generated"
    );

    Ok(Json(json!({
        "success": true,
        "data": report,
    })))
}

/// GET /reports/bills/{plate_number} - Lifetime bill of one car.
async fn bill(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plate_number): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let reports = ReportRepository::new((*state.db).clone());
    let car = reports.car(&plate_number).await?;
    let (services, payments) = if car.is_some() {
        (
            reports.service_records_for_car(&plate_number).await?,
            reports.payments_for_car(&plate_number).await?,
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let invoice =
        BillingService::build_invoice(&plate_number, car, services, payments, auth.username())?;

    info!(
        plate_number = %plate_number,
        balance = %invoice.totals.balance,
        "Bill generated"
    );

    Ok(Json(json!({
        "success": true,
        "data": invoice,
    })))
}
