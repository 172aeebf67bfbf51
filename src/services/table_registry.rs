//! Table registry
//!
//! Physical dining tables. Names are unique and the registry never holds more
//! than [`MAX_TABLES`] rows. Tables are never deleted.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{prelude::*, tables};
use crate::error::{AppError, AppResult, DbResultExt};

pub const MAX_TABLES: u64 = 4;

fn validate_name(table_name: &str) -> AppResult<()> {
    if table_name.trim().is_empty() {
        return Err(AppError::validation("table name cannot be empty"));
    }
    Ok(())
}

pub async fn find_table<C: ConnectionTrait>(db: &C, table_id: i32) -> AppResult<tables::Model> {
    Tables::find_by_id(table_id)
        .one(db)
        .await
        .context("failed to find table")?
        .ok_or_else(|| AppError::not_found("table not found"))
}

pub async fn find_table_by_name<C: ConnectionTrait>(
    db: &C,
    table_name: &str,
) -> AppResult<Option<tables::Model>> {
    Tables::find()
        .filter(tables::Column::TableName.eq(table_name))
        .one(db)
        .await
        .context("failed to find table by name")
}

pub async fn get_table_by_name(db: &DatabaseConnection, table_name: &str) -> AppResult<tables::Model> {
    find_table_by_name(db, table_name)
        .await?
        .ok_or_else(|| AppError::not_found("table not found"))
}

pub async fn list_tables(db: &DatabaseConnection) -> AppResult<Vec<tables::Model>> {
    Tables::find()
        .order_by_asc(tables::Column::Id)
        .all(db)
        .await
        .context("failed to list tables")
}

pub async fn count_tables<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    Tables::find().count(db).await.context("failed to count tables")
}

/// Create a table; the name check, count and insert run in one transaction
/// holding a write lock on `tables` so concurrent creates cannot pass the limit.
pub async fn create_table(db: &DatabaseConnection, table_name: &str) -> AppResult<tables::Model> {
    validate_name(table_name)?;

    let txn = db.begin().await.context("failed to start transaction")?;

    // SQLite serializes writers on its own
    if txn.get_database_backend() == DbBackend::Postgres {
        txn.execute_unprepared("LOCK TABLE tables IN SHARE ROW EXCLUSIVE MODE")
            .await
            .context("failed to lock tables")?;
    }

    if find_table_by_name(&txn, table_name).await?.is_some() {
        return Err(AppError::validation("table name already exists"));
    }

    if count_tables(&txn).await? >= MAX_TABLES {
        tracing::warn!(table_name, max = MAX_TABLES, "Table limit reached");
        return Err(AppError::CapacityExceeded(
            "maximum number of tables reached".to_string(),
        ));
    }

    let table = tables::ActiveModel {
        table_name: Set(table_name.to_string()),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .context("failed to create table")?;
    txn.commit().await.context("failed to commit table")?;

    tracing::info!(table_id = table.id, table_name = %table.table_name, "Table created");
    Ok(table)
}

pub async fn update_table(
    db: &DatabaseConnection,
    table_id: i32,
    table_name: &str,
) -> AppResult<tables::Model> {
    validate_name(table_name)?;

    let current = find_table(db, table_id).await?;

    // Uniqueness only matters when the name actually changes
    if current.table_name != table_name && find_table_by_name(db, table_name).await?.is_some() {
        return Err(AppError::validation("table name already exists"));
    }

    let mut active: tables::ActiveModel = current.into();
    active.table_name = Set(table_name.to_string());

    active.update(db).await.context("failed to update table")
}
