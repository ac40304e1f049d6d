//! Payment repository.

use chrono::NaiveDate;
use crpms_core::billing::PaymentRow;
use crpms_shared::types::PaymentNumber;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::error::{RepositoryError, is_foreign_key_violation};
use crate::entities::{cars, payments};

/// Payment joined with the paying car.
#[derive(Debug, FromQueryResult)]
pub(crate) struct JoinedPayment {
    payment_number: i32,
    amount_paid: Decimal,
    payment_date: NaiveDate,
    plate_number: String,
    car_type: Option<String>,
    car_model: Option<String>,
    driver_phone: Option<String>,
    mechanic_name: Option<String>,
}

impl From<JoinedPayment> for PaymentRow {
    fn from(row: JoinedPayment) -> Self {
        Self {
            payment_number: PaymentNumber(row.payment_number),
            amount_paid: row.amount_paid,
            payment_date: row.payment_date,
            plate_number: row.plate_number,
            car_type: row.car_type,
            car_model: row.car_model,
            driver_phone: row.driver_phone,
            mechanic_name: row.mechanic_name,
        }
    }
}

/// Base query selecting payments joined with their car.
pub(crate) fn joined_payments() -> Select<payments::Entity> {
    payments::Entity::find()
        .select_only()
        .column(payments::Column::PaymentNumber)
        .column(payments::Column::AmountPaid)
        .column(payments::Column::PaymentDate)
        .column(payments::Column::PlateNumber)
        .column(cars::Column::CarType)
        .column(cars::Column::CarModel)
        .column(cars::Column::DriverPhone)
        .column(cars::Column::MechanicName)
        .join(JoinType::InnerJoin, payments::Relation::Cars.def())
}

/// Payment repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payment for a car. The caller has already checked that the
    /// amount is non-negative.
    ///
    /// # Errors
    ///
    /// Returns `CarNotFound` if the plate number is not registered.
    pub async fn create(
        &self,
        amount_paid: Decimal,
        payment_date: NaiveDate,
        plate_number: &str,
    ) -> Result<PaymentNumber, RepositoryError> {
        let car_exists = cars::Entity::find_by_id(plate_number.to_string())
            .count(&self.db)
            .await?
            > 0;
        if !car_exists {
            return Err(RepositoryError::CarNotFound(plate_number.to_string()));
        }

        let payment = payments::ActiveModel {
            payment_number: NotSet,
            amount_paid: Set(amount_paid),
            payment_date: Set(payment_date),
            plate_number: Set(plate_number.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        match payment.insert(&self.db).await {
            Ok(model) => Ok(PaymentNumber(model.payment_number)),
            // The car was removed after the check.
            Err(e) if is_foreign_key_violation(&e) => {
                Err(RepositoryError::CarNotFound(plate_number.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists every payment, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<PaymentRow>, RepositoryError> {
        let rows = joined_payments()
            .order_by_desc(payments::Column::PaymentDate)
            .order_by_desc(payments::Column::PaymentNumber)
            .into_model::<JoinedPayment>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Lists the payments of one car, newest first. An unknown plate number
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_car(&self, plate_number: &str) -> Result<Vec<PaymentRow>, RepositoryError> {
        let rows = joined_payments()
            .filter(payments::Column::PlateNumber.eq(plate_number))
            .order_by_desc(payments::Column::PaymentDate)
            .order_by_desc(payments::Column::PaymentNumber)
            .into_model::<JoinedPayment>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
