use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::menu_items;

/// Body of `POST /menu-items` and `PUT /menu-items/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemRequest {
    pub item_name: String,
    #[serde(default)]
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemResponse {
    pub id: i32,
    pub item_name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<menu_items::Model> for MenuItemResponse {
    fn from(item: menu_items::Model) -> Self {
        Self {
            id: item.id,
            item_name: item.item_name,
            category: item.category,
            price: item.price,
            stock: item.stock,
            description: item.description,
            created_at: item.created_at,
        }
    }
}
