//! Car repository for database operations.

use crpms_core::billing::CarRecord;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use super::error::{RepositoryError, is_unique_violation};
use crate::entities::cars;

/// Input for registering a car.
#[derive(Debug, Clone, Default)]
pub struct NewCar {
    /// Plate number (identity key).
    pub plate_number: String,
    /// Car type.
    pub car_type: Option<String>,
    /// Car model.
    pub car_model: Option<String>,
    /// Manufacturing year.
    pub manufacturing_year: Option<i32>,
    /// Driver phone.
    pub driver_phone: Option<String>,
    /// Mechanic responsible for the car.
    pub mechanic_name: Option<String>,
}

impl From<cars::Model> for CarRecord {
    fn from(model: cars::Model) -> Self {
        Self {
            plate_number: model.plate_number,
            car_type: model.car_type,
            car_model: model.car_model,
            manufacturing_year: model.manufacturing_year,
            driver_phone: model.driver_phone,
            mechanic_name: model.mechanic_name,
        }
    }
}

/// Car repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CarRepository {
    db: DatabaseConnection,
}

impl CarRepository {
    /// Creates a new car repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a car.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCar` if the plate number is already registered.
    pub async fn create(&self, input: NewCar) -> Result<CarRecord, RepositoryError> {
        if self.exists(&input.plate_number).await? {
            return Err(RepositoryError::DuplicateCar(input.plate_number));
        }

        let plate_number = input.plate_number.clone();
        let car = cars::ActiveModel {
            plate_number: Set(input.plate_number),
            car_type: Set(input.car_type),
            car_model: Set(input.car_model),
            manufacturing_year: Set(input.manufacturing_year),
            driver_phone: Set(input.driver_phone),
            mechanic_name: Set(input.mechanic_name),
            created_at: Set(chrono::Utc::now().into()),
        };

        // A concurrent insert can still win between the check and the insert.
        match car.insert(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::DuplicateCar(plate_number)),
            Err(e) => Err(e.into()),
        }
    }

    /// Finds a car by plate number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, plate_number: &str) -> Result<Option<CarRecord>, DbErr> {
        Ok(cars::Entity::find_by_id(plate_number.to_string())
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    /// Lists all cars, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<CarRecord>, DbErr> {
        Ok(cars::Entity::find()
            .order_by_desc(cars::Column::CreatedAt)
            .order_by_asc(cars::Column::PlateNumber)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Checks if a plate number is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists(&self, plate_number: &str) -> Result<bool, DbErr> {
        let count = cars::Entity::find_by_id(plate_number.to_string())
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
