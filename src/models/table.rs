use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::entities::tables;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRequest {
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResponse {
    pub id: i32,
    pub table_name: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<tables::Model> for TableResponse {
    fn from(table: tables::Model) -> Self {
        Self {
            id: table.id,
            table_name: table.table_name,
            created_at: table.created_at,
        }
    }
}
