//! Service record repository.
//!
//! Reads always join the car and the catalog entry so callers get the flat
//! row shape the billing views consume.

use chrono::NaiveDate;
use crpms_core::billing::ServiceRecordRow;
use crpms_shared::types::{RecordNumber, ServiceCode};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::error::{RepositoryError, is_foreign_key_violation};
use crate::entities::{cars, service_records, services};

/// Fields written when creating or updating a service record.
#[derive(Debug, Clone)]
pub struct ServiceRecordInput {
    /// Date the service was performed.
    pub service_date: NaiveDate,
    /// Plate number of an existing car.
    pub plate_number: String,
    /// Code of an existing catalog entry.
    pub service_code: ServiceCode,
}

/// Service record joined with its car and catalog entry.
#[derive(Debug, FromQueryResult)]
pub(crate) struct JoinedServiceRecord {
    record_number: i32,
    service_date: NaiveDate,
    plate_number: String,
    service_code: i32,
    car_type: Option<String>,
    car_model: Option<String>,
    driver_phone: Option<String>,
    mechanic_name: Option<String>,
    service_name: String,
    service_price: Decimal,
}

impl From<JoinedServiceRecord> for ServiceRecordRow {
    fn from(row: JoinedServiceRecord) -> Self {
        Self {
            record_number: RecordNumber(row.record_number),
            service_date: row.service_date,
            plate_number: row.plate_number,
            car_type: row.car_type,
            car_model: row.car_model,
            driver_phone: row.driver_phone,
            mechanic_name: row.mechanic_name,
            service_code: ServiceCode(row.service_code),
            service_name: row.service_name,
            service_price: row.service_price,
        }
    }
}

/// Base query selecting service records joined with car and service.
pub(crate) fn joined_service_records() -> Select<service_records::Entity> {
    service_records::Entity::find()
        .select_only()
        .column(service_records::Column::RecordNumber)
        .column(service_records::Column::ServiceDate)
        .column(service_records::Column::PlateNumber)
        .column(service_records::Column::ServiceCode)
        .column(cars::Column::CarType)
        .column(cars::Column::CarModel)
        .column(cars::Column::DriverPhone)
        .column(cars::Column::MechanicName)
        .column(services::Column::ServiceName)
        .column(services::Column::ServicePrice)
        .join(JoinType::InnerJoin, service_records::Relation::Cars.def())
        .join(JoinType::InnerJoin, service_records::Relation::Services.def())
}

/// Service record repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ServiceRecordRepository {
    db: DatabaseConnection,
}

impl ServiceRecordRepository {
    /// Creates a new service record repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a service performed on a car.
    ///
    /// # Errors
    ///
    /// Returns `CarNotFound` or `ServiceNotFound` if a reference does not
    /// exist.
    pub async fn create(&self, input: ServiceRecordInput) -> Result<RecordNumber, RepositoryError> {
        self.ensure_references(&input).await?;

        let record = service_records::ActiveModel {
            record_number: NotSet,
            service_date: Set(input.service_date),
            plate_number: Set(input.plate_number.clone()),
            service_code: Set(input.service_code.into_inner()),
            created_at: Set(chrono::Utc::now().into()),
        };

        match record.insert(&self.db).await {
            Ok(model) => Ok(RecordNumber(model.record_number)),
            Err(e) if is_foreign_key_violation(&e) => {
                self.ensure_references(&input).await?;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the date, car and service of an existing record.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if the record does not exist, then
    /// `CarNotFound` or `ServiceNotFound` for a missing reference.
    pub async fn update(
        &self,
        record_number: RecordNumber,
        input: ServiceRecordInput,
    ) -> Result<(), RepositoryError> {
        let exists = service_records::Entity::find_by_id(record_number.into_inner())
            .count(&self.db)
            .await?
            > 0;
        if !exists {
            return Err(RepositoryError::RecordNotFound(record_number));
        }

        self.ensure_references(&input).await?;

        let updated = service_records::Entity::update_many()
            .col_expr(
                service_records::Column::ServiceDate,
                sea_orm::sea_query::Expr::value(input.service_date),
            )
            .col_expr(
                service_records::Column::PlateNumber,
                sea_orm::sea_query::Expr::value(input.plate_number.clone()),
            )
            .col_expr(
                service_records::Column::ServiceCode,
                sea_orm::sea_query::Expr::value(input.service_code.into_inner()),
            )
            .filter(service_records::Column::RecordNumber.eq(record_number.into_inner()))
            .exec(&self.db)
            .await;

        match updated {
            Ok(result) if result.rows_affected == 0 => {
                Err(RepositoryError::RecordNotFound(record_number))
            }
            Ok(_) => Ok(()),
            Err(e) if is_foreign_key_violation(&e) => {
                self.ensure_references(&input).await?;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a service record.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if the record does not exist.
    pub async fn delete(&self, record_number: RecordNumber) -> Result<(), RepositoryError> {
        let result = service_records::Entity::delete_by_id(record_number.into_inner())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::RecordNotFound(record_number));
        }

        Ok(())
    }

    /// Finds one record with its car and service details.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        record_number: RecordNumber,
    ) -> Result<Option<ServiceRecordRow>, RepositoryError> {
        let row = joined_service_records()
            .filter(service_records::Column::RecordNumber.eq(record_number.into_inner()))
            .into_model::<JoinedServiceRecord>()
            .one(&self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Lists every record, newest service date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<ServiceRecordRow>, RepositoryError> {
        let rows = joined_service_records()
            .order_by_desc(service_records::Column::ServiceDate)
            .order_by_desc(service_records::Column::RecordNumber)
            .into_model::<JoinedServiceRecord>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ensure_references(&self, input: &ServiceRecordInput) -> Result<(), RepositoryError> {
        let car_exists = cars::Entity::find_by_id(input.plate_number.clone())
            .count(&self.db)
            .await?
            > 0;
        if !car_exists {
            return Err(RepositoryError::CarNotFound(input.plate_number.clone()));
        }

        let service_exists = services::Entity::find_by_id(input.service_code.into_inner())
            .count(&self.db)
            .await?
            > 0;
        if !service_exists {
            return Err(RepositoryError::ServiceNotFound(input.service_code));
        }

        Ok(())
    }
}
