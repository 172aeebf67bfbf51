//! `SeaORM` Entity for tables

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub table_name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::customer_orders::Entity")]
    CustomerOrders,
}

impl Related<super::customer_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
