//! Menu catalog
//!
//! CRUD for menu items. Stock is only moved by the line-item workflow.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{menu_items, order_details, prelude::*};
use crate::error::{AppError, AppResult, DbResultExt};
use crate::models::menu_item::MenuItemRequest;

fn validate(item: &MenuItemRequest) -> AppResult<()> {
    if item.item_name.trim().is_empty() {
        return Err(AppError::validation("item name cannot be empty"));
    }
    if item.description.trim().is_empty() {
        return Err(AppError::validation("description cannot be empty"));
    }
    if item.price <= Decimal::ZERO {
        return Err(AppError::validation("price must be greater than 0"));
    }
    if item.stock < 0 {
        return Err(AppError::validation("stock cannot be negative"));
    }
    Ok(())
}

pub async fn find_menu_item<C: ConnectionTrait>(
    db: &C,
    item_id: i32,
) -> AppResult<menu_items::Model> {
    MenuItems::find_by_id(item_id)
        .one(db)
        .await
        .context("failed to find menu item")?
        .ok_or_else(|| AppError::not_found("menu item not found"))
}

async fn name_taken(db: &DatabaseConnection, item_name: &str) -> AppResult<bool> {
    let existing = MenuItems::find()
        .filter(menu_items::Column::ItemName.eq(item_name))
        .one(db)
        .await
        .context("failed to check item name uniqueness")?;
    Ok(existing.is_some())
}

pub async fn list_menu_items(db: &DatabaseConnection) -> AppResult<Vec<menu_items::Model>> {
    MenuItems::find()
        .order_by_asc(menu_items::Column::Id)
        .all(db)
        .await
        .context("failed to list menu items")
}

pub async fn create_menu_item(
    db: &DatabaseConnection,
    item: MenuItemRequest,
) -> AppResult<menu_items::Model> {
    validate(&item)?;

    if name_taken(db, &item.item_name).await? {
        return Err(AppError::validation("item name already exists"));
    }

    let created = menu_items::ActiveModel {
        item_name: Set(item.item_name),
        category: Set(item.category),
        price: Set(item.price),
        stock: Set(item.stock),
        description: Set(item.description),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(db)
    .await
    .context("failed to create menu item")?;

    tracing::info!(item_id = created.id, item_name = %created.item_name, "Menu item created");
    Ok(created)
}

pub async fn update_menu_item(
    db: &DatabaseConnection,
    item_id: i32,
    item: MenuItemRequest,
) -> AppResult<menu_items::Model> {
    validate(&item)?;

    let current = find_menu_item(db, item_id).await?;

    if current.item_name != item.item_name && name_taken(db, &item.item_name).await? {
        return Err(AppError::validation("item name already exists"));
    }

    let mut active: menu_items::ActiveModel = current.into();
    active.item_name = Set(item.item_name);
    active.category = Set(item.category);
    active.price = Set(item.price);
    active.stock = Set(item.stock);
    active.description = Set(item.description);

    active.update(db).await.context("failed to update menu item")
}

/// Items still referenced by a line item stay in the catalog
pub async fn delete_menu_item(db: &DatabaseConnection, item_id: i32) -> AppResult<()> {
    let references = OrderDetails::find()
        .filter(order_details::Column::MenuItemId.eq(item_id))
        .count(db)
        .await
        .context("failed to check menu item references")?;
    if references > 0 {
        return Err(AppError::Conflict(
            "menu item is referenced by existing order details".to_string(),
        ));
    }

    let result = MenuItems::delete_by_id(item_id)
        .exec(db)
        .await
        .context("failed to delete menu item")?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("menu item not found"));
    }

    tracing::info!(item_id, "Menu item deleted");
    Ok(())
}
