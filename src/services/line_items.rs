//! Line items and stock reservation
//!
//! A line item reserves `quantity` units of a menu item for an order. Every
//! mutation runs in one transaction that moves stock, writes the line item and
//! recomputes the owning order's total, so a failure leaves nothing behind.
//! Rows are locked in a fixed order: table, detail, orders by id, menu items
//! by id.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::customer_orders::{self, OrderStatus};
use crate::entities::{menu_items, order_details, prelude::*};
use crate::error::{AppError, AppResult, DbResultExt};
use crate::services::order_ledger::{self, PENDING_ORDER_EXISTS};

/// A line item with its menu item attached
#[derive(Debug, Clone)]
pub struct LineItem {
    pub detail: order_details::Model,
    pub menu_item: Option<menu_items::Model>,
}

/// Input for [`create_line_item`]. `order_id` of `None` or `Some(0)` opens a new order.
#[derive(Debug, Clone, Copy)]
pub struct NewLineItem {
    pub order_id: Option<i32>,
    pub menu_item_id: i32,
    pub quantity: i32,
}

/// Full replacement of a line item's mutable fields
#[derive(Debug, Clone, Copy)]
pub struct LineItemChange {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
}

fn ensure_positive(value: i32, message: &str) -> AppResult<()> {
    if value <= 0 {
        return Err(AppError::validation(message));
    }
    Ok(())
}

/// Stock left after taking `requested` units, counting `reserved` units the
/// caller already holds on this item as available.
pub fn reserve(item: &menu_items::Model, reserved: i32, requested: i32) -> AppResult<i32> {
    let available = restock(item, reserved)?;
    if available < requested {
        return Err(AppError::InsufficientStock {
            item_name: item.item_name.clone(),
            item_id: item.id,
            available,
            requested,
        });
    }
    Ok(available - requested)
}

/// Stock after handing `quantity` units back to the item
pub fn restock(item: &menu_items::Model, quantity: i32) -> AppResult<i32> {
    item.stock.checked_add(quantity).ok_or_else(|| {
        AppError::validation(format!(
            "stock for item {} (ID: {}) would exceed the maximum",
            item.item_name, item.id
        ))
    })
}

fn ensure_pending(order: &customer_orders::Model, action: &str) -> AppResult<()> {
    if order.status == OrderStatus::Completed {
        return Err(AppError::InvalidState(format!(
            "cannot {action} order detail: customer order is already completed"
        )));
    }
    Ok(())
}

async fn lock_menu_item(
    txn: &DatabaseTransaction,
    item_id: i32,
) -> AppResult<menu_items::Model> {
    MenuItems::find_by_id(item_id)
        .lock_exclusive()
        .one(txn)
        .await
        .context("failed to find menu item")?
        .ok_or_else(|| AppError::not_found("menu item not found"))
}

async fn lock_detail(
    txn: &DatabaseTransaction,
    detail_id: i32,
) -> AppResult<order_details::Model> {
    OrderDetails::find_by_id(detail_id)
        .lock_exclusive()
        .one(txn)
        .await
        .context("failed to find order detail")?
        .ok_or_else(|| AppError::not_found("order detail not found"))
}

async fn set_stock(
    txn: &DatabaseTransaction,
    item: menu_items::Model,
    stock: i32,
) -> AppResult<menu_items::Model> {
    let mut active: menu_items::ActiveModel = item.into();
    active.stock = Set(stock);
    active.update(txn).await.context("failed to update stock")
}

/// Resolve the order a new line item goes to, opening one when asked
async fn resolve_order(
    txn: &DatabaseTransaction,
    table_id: i32,
    order_id: Option<i32>,
) -> AppResult<customer_orders::Model> {
    match order_id.filter(|id| *id != 0) {
        None => {
            if order_ledger::find_pending_by_table(txn, table_id).await?.is_some() {
                return Err(AppError::Conflict(PENDING_ORDER_EXISTS.to_string()));
            }

            if let Some(last) = order_ledger::find_completed_by_table(txn, table_id).await? {
                tracing::debug!(
                    table_id,
                    last_order_id = last.id,
                    "Opening new order after completed order"
                );
            }

            order_ledger::create_order(txn, table_id).await
        }
        Some(order_id) => {
            let order = order_ledger::lock_order(txn, order_id).await?;
            if order.table_id != table_id {
                return Err(AppError::Conflict(
                    "customer order does not belong to the specified table".to_string(),
                ));
            }
            ensure_pending(&order, "add")?;
            Ok(order)
        }
    }
}

/// Attach a line item to a table's order, reserving stock
pub async fn create_line_item(
    db: &DatabaseConnection,
    table_id: i32,
    new: NewLineItem,
) -> AppResult<LineItem> {
    ensure_positive(table_id, "invalid table ID")?;
    ensure_positive(new.menu_item_id, "invalid menu item ID")?;
    ensure_positive(new.quantity, "quantity must be greater than 0")?;

    let txn = db.begin().await.context("failed to start transaction")?;

    Tables::find_by_id(table_id)
        .lock_exclusive()
        .one(&txn)
        .await
        .context("failed to find table")?
        .ok_or_else(|| AppError::not_found("table not found"))?;

    let order = resolve_order(&txn, table_id, new.order_id).await?;

    let item = lock_menu_item(&txn, new.menu_item_id).await?;
    let remaining = reserve(&item, 0, new.quantity)?;
    let item = set_stock(&txn, item, remaining).await?;

    let detail = order_details::ActiveModel {
        order_id: Set(order.id),
        menu_item_id: Set(item.id),
        quantity: Set(new.quantity),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .context("failed to create order detail")?;

    let total = order_ledger::refresh_total(&txn, order.id).await?;
    txn.commit().await.context("failed to commit order detail")?;

    tracing::info!(
        detail_id = detail.id,
        order_id = order.id,
        table_id,
        menu_item_id = item.id,
        quantity = detail.quantity,
        remaining_stock = item.stock,
        %total,
        "Line item added"
    );

    Ok(LineItem {
        detail,
        menu_item: Some(item),
    })
}

pub async fn get_line_item(db: &DatabaseConnection, detail_id: i32) -> AppResult<LineItem> {
    ensure_positive(detail_id, "invalid order detail ID")?;

    let (detail, menu_item) = OrderDetails::find_by_id(detail_id)
        .find_also_related(MenuItems)
        .one(db)
        .await
        .context("failed to find order detail")?
        .ok_or_else(|| AppError::not_found("order detail not found"))?;

    Ok(LineItem { detail, menu_item })
}

/// Line items of an order in insertion order. Does not check the order exists.
pub async fn list_for_order<C: ConnectionTrait>(db: &C, order_id: i32) -> AppResult<Vec<LineItem>> {
    let rows = OrderDetails::find()
        .filter(order_details::Column::OrderId.eq(order_id))
        .order_by_asc(order_details::Column::Id)
        .find_also_related(MenuItems)
        .all(db)
        .await
        .context("failed to list order details")?;

    Ok(rows
        .into_iter()
        .map(|(detail, menu_item)| LineItem { detail, menu_item })
        .collect())
}

pub async fn get_line_items_by_order(
    db: &DatabaseConnection,
    order_id: i32,
) -> AppResult<Vec<LineItem>> {
    ensure_positive(order_id, "invalid order ID")?;
    order_ledger::find_order(db, order_id).await?;
    list_for_order(db, order_id).await
}

/// Replace a line item's order, menu item and quantity, reconciling stock
pub async fn update_line_item(db: &DatabaseConnection, change: LineItemChange) -> AppResult<LineItem> {
    ensure_positive(change.id, "invalid order detail ID")?;
    ensure_positive(change.order_id, "invalid order ID")?;
    ensure_positive(change.menu_item_id, "invalid menu item ID")?;
    ensure_positive(change.quantity, "quantity must be greater than 0")?;

    let txn = db.begin().await.context("failed to start transaction")?;

    let current = lock_detail(&txn, change.id).await?;

    let mut order_ids = vec![current.order_id, change.order_id];
    order_ids.sort_unstable();
    order_ids.dedup();
    for order_id in order_ids {
        let order = order_ledger::lock_order(&txn, order_id).await?;
        ensure_pending(&order, "update")?;
    }

    let item = if change.menu_item_id == current.menu_item_id {
        let item = lock_menu_item(&txn, current.menu_item_id).await?;
        let remaining = reserve(&item, current.quantity, change.quantity)?;
        set_stock(&txn, item, remaining).await?
    } else {
        let mut locked = MenuItems::find()
            .filter(menu_items::Column::Id.is_in([current.menu_item_id, change.menu_item_id]))
            .order_by_asc(menu_items::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await
            .context("failed to lock menu items")?;

        let new_pos = locked
            .iter()
            .position(|m| m.id == change.menu_item_id)
            .ok_or_else(|| AppError::not_found("menu item not found"))?;
        let new_item = locked.swap_remove(new_pos);

        // Release the old reservation before taking the new one
        if let Some(old_item) = locked.pop() {
            let restored = restock(&old_item, current.quantity)?;
            set_stock(&txn, old_item, restored).await?;
        }

        let remaining = reserve(&new_item, 0, change.quantity)?;
        set_stock(&txn, new_item, remaining).await?
    };

    let mut active: order_details::ActiveModel = current.clone().into();
    active.order_id = Set(change.order_id);
    active.menu_item_id = Set(change.menu_item_id);
    active.quantity = Set(change.quantity);
    let detail = active
        .update(&txn)
        .await
        .context("failed to update order detail")?;

    order_ledger::refresh_total(&txn, current.order_id).await?;
    if change.order_id != current.order_id {
        order_ledger::refresh_total(&txn, change.order_id).await?;
    }

    txn.commit().await.context("failed to commit order detail")?;

    tracing::info!(
        detail_id = detail.id,
        order_id = detail.order_id,
        menu_item_id = detail.menu_item_id,
        quantity = detail.quantity,
        "Line item updated"
    );

    Ok(LineItem {
        detail,
        menu_item: Some(item),
    })
}

/// Remove a line item from a pending order, releasing its stock
pub async fn delete_line_item(db: &DatabaseConnection, detail_id: i32) -> AppResult<()> {
    ensure_positive(detail_id, "invalid order detail ID")?;

    let txn = db.begin().await.context("failed to start transaction")?;

    let detail = lock_detail(&txn, detail_id).await?;
    let order = order_ledger::lock_order(&txn, detail.order_id).await?;
    ensure_pending(&order, "delete")?;

    let item = lock_menu_item(&txn, detail.menu_item_id).await?;
    let restored = restock(&item, detail.quantity)?;
    set_stock(&txn, item, restored).await?;

    let order_id = detail.order_id;
    let quantity = detail.quantity;
    detail
        .delete(&txn)
        .await
        .context("failed to delete order detail")?;

    order_ledger::refresh_total(&txn, order_id).await?;
    txn.commit().await.context("failed to commit order detail")?;

    tracing::info!(detail_id, order_id, quantity, "Line item removed");
    Ok(())
}
