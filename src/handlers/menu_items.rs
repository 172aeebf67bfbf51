use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{Principal, MANAGEMENT};
use crate::error::AppResult;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::models::menu_item::{MenuItemRequest, MenuItemResponse};
use crate::services::menu_catalog;
use crate::AppState;

/// Public: the menu is readable without a token
pub async fn list_menu_items(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MenuItemResponse>>> {
    let items = menu_catalog::list_menu_items(&state.db).await?;
    Ok(Json(items.into_iter().map(MenuItemResponse::from).collect()))
}

pub async fn get_menu_item(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(item_id): ApiPath<i32>,
) -> AppResult<Json<MenuItemResponse>> {
    principal.authorize(MANAGEMENT)?;
    let item = menu_catalog::find_menu_item(&state.db, item_id).await?;
    Ok(Json(item.into()))
}

pub async fn create_menu_item(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<MenuItemRequest>,
) -> AppResult<(StatusCode, Json<MenuItemResponse>)> {
    principal.authorize(MANAGEMENT)?;
    let item = menu_catalog::create_menu_item(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn update_menu_item(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(item_id): ApiPath<i32>,
    ApiJson(request): ApiJson<MenuItemRequest>,
) -> AppResult<Json<MenuItemResponse>> {
    principal.authorize(MANAGEMENT)?;
    let item = menu_catalog::update_menu_item(&state.db, item_id, request).await?;
    Ok(Json(item.into()))
}

pub async fn delete_menu_item(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(item_id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    principal.authorize(MANAGEMENT)?;
    menu_catalog::delete_menu_item(&state.db, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
