use axum::{extract::State, Json};

use crate::auth::{Principal, FLOOR, MANAGEMENT, STAFF};
use crate::error::AppResult;
use crate::handlers::extract::ApiPath;
use crate::models::order::{CustomerOrderResponse, OrderDetailResponse};
use crate::services::{line_items, order_workflow};
use crate::AppState;

pub async fn get_order(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(order_id): ApiPath<i32>,
) -> AppResult<Json<CustomerOrderResponse>> {
    principal.authorize(STAFF)?;
    let order = order_workflow::get_order_with_details(&state.db, order_id).await?;
    Ok(Json(order.into()))
}

pub async fn get_order_details(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(order_id): ApiPath<i32>,
) -> AppResult<Json<Vec<OrderDetailResponse>>> {
    principal.authorize(STAFF)?;
    let lines = line_items::get_line_items_by_order(&state.db, order_id).await?;
    Ok(Json(lines.into_iter().map(OrderDetailResponse::from).collect()))
}

pub async fn complete_order(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(order_id): ApiPath<i32>,
) -> AppResult<Json<CustomerOrderResponse>> {
    principal.authorize(MANAGEMENT)?;
    let order = order_workflow::complete_order(&state.db, order_id).await?;
    Ok(Json(order.into()))
}

/// Same transition as [`complete_order`], open to floor staff
pub async fn complete_order_by_employee(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(order_id): ApiPath<i32>,
) -> AppResult<Json<CustomerOrderResponse>> {
    principal.authorize(FLOOR)?;
    let order = order_workflow::complete_order(&state.db, order_id).await?;
    Ok(Json(order.into()))
}
