//! Order workflow
//!
//! Entry points the HTTP layer calls for the order lifecycle. Role checks
//! happen before these are reached; nothing here knows about roles.

use sea_orm::DatabaseConnection;

use crate::error::{AppError, AppResult};
use crate::models::order::CreateOrderDetailRequest;
use crate::services::line_items::{self, LineItem, NewLineItem};
use crate::services::order_ledger::{self, OrderWithDetails};
use crate::services::table_registry;

fn ensure_order_id(order_id: i32) -> AppResult<()> {
    if order_id <= 0 {
        return Err(AppError::validation("invalid order ID"));
    }
    Ok(())
}

/// Add a line item to a table, opening its order when no order id is given
pub async fn attach_line_item(
    db: &DatabaseConnection,
    request: CreateOrderDetailRequest,
) -> AppResult<LineItem> {
    line_items::create_line_item(
        db,
        request.table_id,
        NewLineItem {
            order_id: request.order_id,
            menu_item_id: request.menu_item_id,
            quantity: request.quantity,
        },
    )
    .await
}

pub async fn get_order_with_details(
    db: &DatabaseConnection,
    order_id: i32,
) -> AppResult<OrderWithDetails> {
    ensure_order_id(order_id)?;
    order_ledger::get_with_details(db, order_id).await
}

/// Close a pending order. Both completion routes land here.
pub async fn complete_order(db: &DatabaseConnection, order_id: i32) -> AppResult<OrderWithDetails> {
    ensure_order_id(order_id)?;

    let order = order_ledger::complete_order(db, order_id).await?;
    let details = line_items::list_for_order(db, order.id).await?;

    Ok(OrderWithDetails { order, details })
}

/// The table's pending order with its line items
pub async fn pending_order_for_table(
    db: &DatabaseConnection,
    table_id: i32,
) -> AppResult<OrderWithDetails> {
    if table_id <= 0 {
        return Err(AppError::validation("invalid table ID"));
    }
    table_registry::find_table(db, table_id).await?;

    let order = order_ledger::find_pending_by_table(db, table_id)
        .await?
        .ok_or_else(|| AppError::not_found("no pending customer order for this table"))?;

    order_ledger::get_with_details(db, order.id).await
}
