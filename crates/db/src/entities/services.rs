//! `SeaORM` Entity for the services catalog table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub service_code: i32,
    pub service_name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub service_price: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::service_records::Entity")]
    ServiceRecords,
}

impl Related<super::service_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
