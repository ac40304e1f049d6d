//! Billing data types.
//!
//! Amounts are `Decimal` end to end and serialize as JSON numbers; dates
//! serialize as `YYYY-MM-DD`.

use chrono::NaiveDate;
use crpms_shared::types::{PaymentNumber, RecordNumber, ServiceCode};
use rust_decimal::Decimal;
use serde::Serialize;

/// One service performed on a car, joined with the car and catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordRow {
    /// Record number.
    pub record_number: RecordNumber,
    /// Date the service was performed.
    pub service_date: NaiveDate,
    /// Plate number of the serviced car.
    pub plate_number: String,
    /// Car type.
    pub car_type: Option<String>,
    /// Car model.
    pub car_model: Option<String>,
    /// Driver phone.
    pub driver_phone: Option<String>,
    /// Mechanic responsible for the car.
    pub mechanic_name: Option<String>,
    /// Catalog entry the service was billed from.
    pub service_code: ServiceCode,
    /// Catalog service name.
    pub service_name: String,
    /// Catalog price charged.
    #[serde(with = "rust_decimal::serde::float")]
    pub service_price: Decimal,
}

/// One payment transaction, joined with the paying car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    /// Payment number.
    pub payment_number: PaymentNumber,
    /// Amount received.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
    /// Plate number of the car paid for.
    pub plate_number: String,
    /// Car type.
    pub car_type: Option<String>,
    /// Car model.
    pub car_model: Option<String>,
    /// Driver phone.
    pub driver_phone: Option<String>,
    /// Mechanic responsible for the car.
    pub mechanic_name: Option<String>,
}

/// Snapshot of a car as printed on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRecord {
    /// Plate number (identity key).
    pub plate_number: String,
    /// Car type.
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    /// Car model.
    #[serde(rename = "model")]
    pub car_model: Option<String>,
    /// Manufacturing year.
    pub manufacturing_year: Option<i32>,
    /// Driver phone.
    pub driver_phone: Option<String>,
    /// Mechanic responsible for the car.
    pub mechanic_name: Option<String>,
}

/// Everything that happened to one car on the report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarAggregate {
    /// Plate number (grouping key).
    pub plate_number: String,
    /// Car type, taken from the first row seen for this car.
    pub car_type: Option<String>,
    /// Car model, taken from the first row seen for this car.
    pub car_model: Option<String>,
    /// Driver phone, taken from the first row seen for this car.
    pub driver_phone: Option<String>,
    /// Mechanic, taken from the first row seen for this car.
    pub mechanic_name: Option<String>,
    /// Services performed, in input order.
    pub services: Vec<ServiceRecordRow>,
    /// Payments received, in input order.
    pub payments: Vec<PaymentRow>,
    /// Sum of `service_price` over `services`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_service_amount: Decimal,
    /// Sum of `amount_paid` over `payments`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payment_amount: Decimal,
}

/// Totals across every car on the report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Number of service rows.
    pub total_services: usize,
    /// Number of payment rows.
    pub total_payments: usize,
    /// Sum of all service prices.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_service_amount: Decimal,
    /// Sum of all payments.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payment_amount: Decimal,
    /// Service amount minus payment amount; negative when more was
    /// collected than charged.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_amount: Decimal,
}

/// Daily operations report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    /// Report date.
    pub date: NaiveDate,
    /// Cars in first-seen order.
    pub cars: Vec<CarAggregate>,
    /// Report-wide totals.
    pub summary: DailySummary,
}

/// A payment line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayment {
    /// Payment number.
    pub payment_number: PaymentNumber,
    /// Amount received.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
}

/// Invoice totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Lifetime service charges.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_service_amount: Decimal,
    /// Lifetime payments.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_paid: Decimal,
    /// Charges minus payments; negative means overpaid.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Bill for one car covering its entire history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Date the invoice was generated.
    pub bill_date: NaiveDate,
    /// Username of the staff member who generated it.
    pub receiver_identity: String,
    /// Car snapshot.
    pub car: CarRecord,
    /// Services, newest first.
    pub services: Vec<ServiceRecordRow>,
    /// Payments, newest first.
    pub payments: Vec<InvoicePayment>,
    /// Totals.
    pub totals: InvoiceTotals,
}
