//! Billing view construction.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::BillingError;
use super::types::{
    CarAggregate, CarRecord, DailyReport, DailySummary, Invoice, InvoicePayment, InvoiceTotals,
    PaymentRow, ServiceRecordRow,
};

/// Service for building daily reports and invoices.
pub struct BillingService;

impl BillingService {
    /// Groups one day's service and payment rows by car.
    ///
    /// Rows are expected to be pre-filtered to `date`; they are not
    /// re-checked. Services are folded before payments, each in the order
    /// given, and cars keep the order in which their plate number was first
    /// seen. No rows yields an empty report with zero totals.
    #[must_use]
    pub fn build_daily_report(
        date: NaiveDate,
        services: Vec<ServiceRecordRow>,
        payments: Vec<PaymentRow>,
    ) -> DailyReport {
        let total_services = services.len();
        let total_payments = payments.len();
        let total_service_amount: Decimal = services.iter().map(|s| s.service_price).sum();
        let total_payment_amount: Decimal = payments.iter().map(|p| p.amount_paid).sum();

        let mut grouping = CarGrouping::default();

        for service in services {
            let car = grouping.entry(&service.plate_number, || {
                CarAggregate::seeded(
                    &service.plate_number,
                    service.car_type.as_deref(),
                    service.car_model.as_deref(),
                    service.driver_phone.as_deref(),
                    service.mechanic_name.as_deref(),
                )
            });
            car.total_service_amount += service.service_price;
            car.services.push(service);
        }

        for payment in payments {
            let car = grouping.entry(&payment.plate_number, || {
                CarAggregate::seeded(
                    &payment.plate_number,
                    payment.car_type.as_deref(),
                    payment.car_model.as_deref(),
                    payment.driver_phone.as_deref(),
                    payment.mechanic_name.as_deref(),
                )
            });
            car.total_payment_amount += payment.amount_paid;
            car.payments.push(payment);
        }

        DailyReport {
            date,
            cars: grouping.into_cars(),
            summary: DailySummary {
                total_services,
                total_payments,
                total_service_amount,
                total_payment_amount,
                net_amount: total_service_amount - total_payment_amount,
            },
        }
    }

    /// Builds the lifetime invoice for a car, dated today (UTC).
    ///
    /// # Errors
    ///
    /// Returns `BillingError::CarNotFound` if `car` is `None`.
    pub fn build_invoice(
        plate_number: &str,
        car: Option<CarRecord>,
        services: Vec<ServiceRecordRow>,
        payments: Vec<InvoicePayment>,
        receiver_identity: &str,
    ) -> Result<Invoice, BillingError> {
        Self::build_invoice_on(
            chrono::Utc::now().date_naive(),
            plate_number,
            car,
            services,
            payments,
            receiver_identity,
        )
    }

    /// Builds the lifetime invoice for a car with an explicit bill date.
    ///
    /// Row order is preserved as given (newest first from the store).
    /// `balance` is charges minus payments and is not clamped: a negative
    /// balance means the customer overpaid.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::CarNotFound` if `car` is `None`.
    pub fn build_invoice_on(
        bill_date: NaiveDate,
        plate_number: &str,
        car: Option<CarRecord>,
        services: Vec<ServiceRecordRow>,
        payments: Vec<InvoicePayment>,
        receiver_identity: &str,
    ) -> Result<Invoice, BillingError> {
        let car = car.ok_or_else(|| BillingError::CarNotFound(plate_number.to_string()))?;

        let total_service_amount: Decimal = services.iter().map(|s| s.service_price).sum();
        let total_paid: Decimal = payments.iter().map(|p| p.amount_paid).sum();

        Ok(Invoice {
            bill_date,
            receiver_identity: receiver_identity.to_string(),
            car,
            services,
            payments,
            totals: InvoiceTotals {
                total_service_amount,
                total_paid,
                balance: total_service_amount - total_paid,
            },
        })
    }
}

impl CarAggregate {
    fn seeded(
        plate_number: &str,
        car_type: Option<&str>,
        car_model: Option<&str>,
        driver_phone: Option<&str>,
        mechanic_name: Option<&str>,
    ) -> Self {
        Self {
            plate_number: plate_number.to_string(),
            car_type: car_type.map(ToString::to_string),
            car_model: car_model.map(ToString::to_string),
            driver_phone: driver_phone.map(ToString::to_string),
            mechanic_name: mechanic_name.map(ToString::to_string),
            services: Vec::new(),
            payments: Vec::new(),
            total_service_amount: Decimal::ZERO,
            total_payment_amount: Decimal::ZERO,
        }
    }
}

/// Insertion-ordered plate number -> aggregate map.
#[derive(Default)]
struct CarGrouping {
    cars: Vec<CarAggregate>,
    index: HashMap<String, usize>,
}

impl CarGrouping {
    fn entry(
        &mut self,
        plate_number: &str,
        seed: impl FnOnce() -> CarAggregate,
    ) -> &mut CarAggregate {
        let slot = match self.index.get(plate_number) {
            Some(&slot) => slot,
            None => {
                let slot = self.cars.len();
                self.cars.push(seed());
                self.index.insert(plate_number.to_string(), slot);
                slot
            }
        };
        &mut self.cars[slot]
    }

    fn into_cars(self) -> Vec<CarAggregate> {
        self.cars
    }
}
