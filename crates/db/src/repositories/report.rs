//! Report repository: the read gateway behind the daily report and the
//! invoice.
//!
//! Every method returns rows already filtered and ordered the way the
//! billing builders expect them; the builders never re-sort.

use chrono::NaiveDate;
use crpms_core::billing::{CarRecord, InvoicePayment, PaymentRow, ServiceRecordRow};
use crpms_shared::types::PaymentNumber;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect,
};

use super::payment::{JoinedPayment, joined_payments};
use super::service_record::{JoinedServiceRecord, joined_service_records};
use crate::entities::{cars, payments, service_records};

#[derive(Debug, FromQueryResult)]
struct PaymentLine {
    payment_number: i32,
    amount_paid: Decimal,
    payment_date: NaiveDate,
}

/// Report repository for billing queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Daily report
    // ========================================================================

    /// Service records performed on `date`, ordered by plate number then
    /// record number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn service_records_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ServiceRecordRow>, DbErr> {
        let rows = joined_service_records()
            .filter(service_records::Column::ServiceDate.eq(date))
            .order_by_asc(service_records::Column::PlateNumber)
            .order_by_asc(service_records::Column::RecordNumber)
            .into_model::<JoinedServiceRecord>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Payments received on `date`, ordered by plate number then payment
    /// number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn payments_for_date(&self, date: NaiveDate) -> Result<Vec<PaymentRow>, DbErr> {
        let rows = joined_payments()
            .filter(payments::Column::PaymentDate.eq(date))
            .order_by_asc(payments::Column::PlateNumber)
            .order_by_asc(payments::Column::PaymentNumber)
            .into_model::<JoinedPayment>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    // ========================================================================
    // Invoice
    // ========================================================================

    /// The car snapshot printed on an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn car(&self, plate_number: &str) -> Result<Option<CarRecord>, DbErr> {
        Ok(cars::Entity::find_by_id(plate_number.to_string())
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    /// Every service record of a car, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn service_records_for_car(
        &self,
        plate_number: &str,
    ) -> Result<Vec<ServiceRecordRow>, DbErr> {
        let rows = joined_service_records()
            .filter(service_records::Column::PlateNumber.eq(plate_number))
            .order_by_desc(service_records::Column::ServiceDate)
            .order_by_desc(service_records::Column::RecordNumber)
            .into_model::<JoinedServiceRecord>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every payment of a car, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn payments_for_car(&self, plate_number: &str) -> Result<Vec<InvoicePayment>, DbErr> {
        let rows = payments::Entity::find()
            .select_only()
            .column(payments::Column::PaymentNumber)
            .column(payments::Column::AmountPaid)
            .column(payments::Column::PaymentDate)
            .filter(payments::Column::PlateNumber.eq(plate_number))
            .order_by_desc(payments::Column::PaymentDate)
            .order_by_desc(payments::Column::PaymentNumber)
            .into_model::<PaymentLine>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|line| InvoicePayment {
                payment_number: PaymentNumber(line.payment_number),
                amount_paid: line.amount_paid,
                payment_date: line.payment_date,
            })
            .collect())
    }
}
