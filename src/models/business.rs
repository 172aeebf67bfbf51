use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::entities::business;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRequest {
    pub business_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub corporate_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessResponse {
    pub id: i32,
    pub business_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub corporate_reason: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<business::Model> for BusinessResponse {
    fn from(model: business::Model) -> Self {
        Self {
            id: model.id,
            business_name: model.business_name,
            address: model.address,
            phone_number: model.phone_number,
            email: model.email,
            corporate_reason: model.corporate_reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
