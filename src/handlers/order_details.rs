use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{Principal, STAFF};
use crate::error::{AppError, AppResult};
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::models::order::{CreateOrderDetailRequest, OrderDetailResponse, UpdateOrderDetailRequest};
use crate::services::line_items::{self, LineItemChange};
use crate::services::order_workflow;
use crate::AppState;

fn validate_create(request: &CreateOrderDetailRequest) -> Result<(), AppError> {
    if request.table_id <= 0 {
        return Err(AppError::validation("table_id must be greater than 0"));
    }
    if request.menu_item_id <= 0 {
        return Err(AppError::validation("menu_item_id must be greater than 0"));
    }
    if request.quantity <= 0 {
        return Err(AppError::validation("quantity must be greater than 0"));
    }
    Ok(())
}

pub async fn create_order_detail(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<CreateOrderDetailRequest>,
) -> AppResult<(StatusCode, Json<OrderDetailResponse>)> {
    principal.authorize(STAFF)?;
    validate_create(&request)?;

    let line = order_workflow::attach_line_item(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(line.into())))
}

pub async fn get_order_detail(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(detail_id): ApiPath<i32>,
) -> AppResult<Json<OrderDetailResponse>> {
    principal.authorize(STAFF)?;
    let line = line_items::get_line_item(&state.db, detail_id).await?;
    Ok(Json(line.into()))
}

pub async fn update_order_detail(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(detail_id): ApiPath<i32>,
    ApiJson(request): ApiJson<UpdateOrderDetailRequest>,
) -> AppResult<Json<OrderDetailResponse>> {
    principal.authorize(STAFF)?;

    let change = LineItemChange {
        id: detail_id,
        order_id: request.order_id,
        menu_item_id: request.menu_item_id,
        quantity: request.quantity,
    };
    let line = line_items::update_line_item(&state.db, change).await?;
    Ok(Json(line.into()))
}

pub async fn delete_order_detail(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(detail_id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    principal.authorize(STAFF)?;
    line_items::delete_line_item(&state.db, detail_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
