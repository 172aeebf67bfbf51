use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{Principal, MANAGEMENT, STAFF};
use crate::error::AppResult;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::models::order::CustomerOrderResponse;
use crate::models::table::{TableRequest, TableResponse};
use crate::services::{order_workflow, table_registry};
use crate::AppState;

pub async fn create_table(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<TableRequest>,
) -> AppResult<(StatusCode, Json<TableResponse>)> {
    principal.authorize(MANAGEMENT)?;
    let table = table_registry::create_table(&state.db, &request.table_name).await?;
    Ok((StatusCode::CREATED, Json(table.into())))
}

pub async fn list_tables(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Vec<TableResponse>>> {
    principal.authorize(STAFF)?;
    let tables = table_registry::list_tables(&state.db).await?;
    Ok(Json(tables.into_iter().map(TableResponse::from).collect()))
}

pub async fn get_table(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(table_id): ApiPath<i32>,
) -> AppResult<Json<TableResponse>> {
    principal.authorize(STAFF)?;
    let table = table_registry::find_table(&state.db, table_id).await?;
    Ok(Json(table.into()))
}

pub async fn update_table(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(table_id): ApiPath<i32>,
    ApiJson(request): ApiJson<TableRequest>,
) -> AppResult<Json<TableResponse>> {
    principal.authorize(STAFF)?;
    let table = table_registry::update_table(&state.db, table_id, &request.table_name).await?;
    Ok(Json(table.into()))
}

/// `GET /tables/{id}/orders/pending`
pub async fn get_pending_order(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(table_id): ApiPath<i32>,
) -> AppResult<Json<CustomerOrderResponse>> {
    principal.authorize(STAFF)?;
    let order = order_workflow::pending_order_for_table(&state.db, table_id).await?;
    Ok(Json(order.into()))
}
