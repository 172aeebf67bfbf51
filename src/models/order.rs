use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::customer_orders::{self, OrderStatus};
use crate::models::menu_item::MenuItemResponse;
use crate::services::line_items::LineItem;
use crate::services::order_ledger::OrderWithDetails;

/// Body of `POST /order-details`
///
/// `order_id` absent (or 0) opens a new order for the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderDetailRequest {
    #[serde(default)]
    pub order_id: Option<i32>,
    pub table_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
}

/// Body of `PUT /order-details/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderDetailRequest {
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<FixedOffset>,
    pub menu_item: Option<MenuItemResponse>,
}

impl From<LineItem> for OrderDetailResponse {
    fn from(line: LineItem) -> Self {
        Self {
            id: line.detail.id,
            order_id: line.detail.order_id,
            menu_item_id: line.detail.menu_item_id,
            quantity: line.detail.quantity,
            created_at: line.detail.created_at,
            menu_item: line.menu_item.map(MenuItemResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrderResponse {
    pub id: i32,
    pub table_id: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_details: Option<Vec<OrderDetailResponse>>,
}

impl From<customer_orders::Model> for CustomerOrderResponse {
    fn from(order: customer_orders::Model) -> Self {
        Self {
            id: order.id,
            table_id: order.table_id,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
            order_details: None,
        }
    }
}

impl From<OrderWithDetails> for CustomerOrderResponse {
    fn from(value: OrderWithDetails) -> Self {
        let details = value.details.into_iter().map(OrderDetailResponse::from).collect();
        Self {
            order_details: Some(details),
            ..Self::from(value.order)
        }
    }
}
