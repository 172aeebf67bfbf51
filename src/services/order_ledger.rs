//! Order ledger
//!
//! Owns the `CustomerOrder` aggregate. An order is opened `pending` with a zero
//! total and moves to `completed` exactly once; there is no other transition.
//! The store's partial unique index backs the one-pending-order-per-table rule.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};

use crate::entities::customer_orders::{self, OrderStatus};
use crate::entities::prelude::*;
use crate::error::{AppError, AppResult, DbResultExt};
use crate::services::line_items::{self, LineItem};

pub const PENDING_ORDER_EXISTS: &str =
    "cannot create new customer order: a pending customer order already exists for this table";

/// An order together with its ordered line items
#[derive(Debug, Clone)]
pub struct OrderWithDetails {
    pub order: customer_orders::Model,
    pub details: Vec<LineItem>,
}

pub async fn find_order<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> AppResult<customer_orders::Model> {
    CustomerOrders::find_by_id(order_id)
        .one(db)
        .await
        .context("failed to find customer order")?
        .ok_or_else(|| AppError::not_found("customer order not found"))
}

/// Same as [`find_order`] but holds a row lock until the transaction ends
pub async fn lock_order<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> AppResult<customer_orders::Model> {
    CustomerOrders::find_by_id(order_id)
        .lock_exclusive()
        .one(db)
        .await
        .context("failed to find customer order")?
        .ok_or_else(|| AppError::not_found("customer order not found"))
}

/// The table's open order, if any. Absence is not an error.
pub async fn find_pending_by_table<C: ConnectionTrait>(
    db: &C,
    table_id: i32,
) -> AppResult<Option<customer_orders::Model>> {
    CustomerOrders::find()
        .filter(customer_orders::Column::TableId.eq(table_id))
        .filter(customer_orders::Column::Status.eq(OrderStatus::Pending))
        .one(db)
        .await
        .context("failed to find pending customer order")
}

/// Most recently created completed order for the table
pub async fn find_completed_by_table<C: ConnectionTrait>(
    db: &C,
    table_id: i32,
) -> AppResult<Option<customer_orders::Model>> {
    CustomerOrders::find()
        .filter(customer_orders::Column::TableId.eq(table_id))
        .filter(customer_orders::Column::Status.eq(OrderStatus::Completed))
        .order_by_desc(customer_orders::Column::CreatedAt)
        .order_by_desc(customer_orders::Column::Id)
        .one(db)
        .await
        .context("failed to query completed customer order by table id")
}

pub async fn create_order<C: ConnectionTrait>(
    db: &C,
    table_id: i32,
) -> AppResult<customer_orders::Model> {
    let order = customer_orders::ActiveModel {
        table_id: Set(table_id),
        total_amount: Set(Decimal::ZERO),
        status: Set(OrderStatus::Pending),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(PENDING_ORDER_EXISTS.to_string())
        }
        _ => AppError::Database {
            context: "failed to create customer order",
            source: e,
        },
    })?;

    tracing::info!(order_id = order.id, table_id, "Customer order opened");
    Ok(order)
}

/// Transition `pending -> completed`
///
/// The status check and the write are a single conditional update, so two
/// concurrent completions cannot both succeed.
pub async fn complete_order<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> AppResult<customer_orders::Model> {
    let result = CustomerOrders::update_many()
        .col_expr(
            customer_orders::Column::Status,
            Expr::value(OrderStatus::Completed),
        )
        .filter(customer_orders::Column::Id.eq(order_id))
        .filter(customer_orders::Column::Status.eq(OrderStatus::Pending))
        .exec(db)
        .await
        .context("failed to complete order")?;

    if result.rows_affected == 0 {
        // Either missing (NotFound) or not pending
        find_order(db, order_id).await?;
        return Err(AppError::InvalidState(
            "order is not in 'pending' state".to_string(),
        ));
    }

    let order = find_order(db, order_id).await?;
    tracing::info!(order_id, table_id = order.table_id, total = %order.total_amount, "Customer order completed");
    Ok(order)
}

pub async fn get_with_details<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> AppResult<OrderWithDetails> {
    let order = find_order(db, order_id).await?;
    let details = line_items::list_for_order(db, order_id).await?;

    Ok(OrderWithDetails { order, details })
}

/// Sum of price x quantity over the given line items
pub fn total_of(details: &[LineItem]) -> Decimal {
    details
        .iter()
        .filter_map(|line| {
            line.menu_item
                .as_ref()
                .map(|item| item.price * Decimal::from(line.detail.quantity))
        })
        .sum()
}

/// Recompute and store the order's total from its current line items
pub async fn refresh_total<C: ConnectionTrait>(db: &C, order_id: i32) -> AppResult<Decimal> {
    let details = line_items::list_for_order(db, order_id).await?;
    let total = total_of(&details);

    CustomerOrders::update_many()
        .col_expr(customer_orders::Column::TotalAmount, Expr::value(total))
        .filter(customer_orders::Column::Id.eq(order_id))
        .exec(db)
        .await
        .context("failed to update order total")?;

    Ok(total)
}
