//! Service catalog repository.

use crpms_shared::types::ServiceCode;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, Set,
};

use crate::entities::services;

/// Service catalog repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ServiceCatalogRepository {
    db: DatabaseConnection,
}

impl ServiceCatalogRepository {
    /// Creates a new service catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a catalog entry. The caller has already checked that the price
    /// is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        service_name: &str,
        service_price: Decimal,
    ) -> Result<services::Model, DbErr> {
        services::ActiveModel {
            service_code: NotSet,
            service_name: Set(service_name.to_string()),
            service_price: Set(service_price),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a catalog entry by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, code: ServiceCode) -> Result<Option<services::Model>, DbErr> {
        services::Entity::find_by_id(code.into_inner())
            .one(&self.db)
            .await
    }

    /// Lists the catalog ordered by service name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<services::Model>, DbErr> {
        services::Entity::find()
            .order_by_asc(services::Column::ServiceName)
            .order_by_asc(services::Column::ServiceCode)
            .all(&self.db)
            .await
    }
}
