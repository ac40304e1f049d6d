//! `SeaORM` Entity for cars table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub plate_number: String,
    pub car_type: Option<String>,
    pub car_model: Option<String>,
    pub manufacturing_year: Option<i32>,
    pub driver_phone: Option<String>,
    pub mechanic_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::service_records::Entity")]
    ServiceRecords,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::service_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRecords.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
