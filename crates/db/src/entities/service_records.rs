//! `SeaORM` Entity for service_records table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub record_number: i32,
    pub service_date: Date,
    pub plate_number: String,
    pub service_code: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cars::Entity",
        from = "Column::PlateNumber",
        to = "super::cars::Column::PlateNumber",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Cars,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceCode",
        to = "super::services::Column::ServiceCode",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Services,
}

impl Related<super::cars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cars.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Services.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
