use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{Principal, MANAGEMENT, STAFF};
use crate::error::AppResult;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::models::task::{TaskRequest, TaskResponse, TaskStatusRequest};
use crate::services::tasks;
use crate::AppState;

pub async fn create_task(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<TaskRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    principal.authorize(MANAGEMENT)?;
    let task = tasks::create_task(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Vec<TaskResponse>>> {
    principal.authorize(MANAGEMENT)?;
    let list = tasks::list_tasks(&state.db).await?;
    Ok(Json(list.into_iter().map(TaskResponse::from).collect()))
}

/// Tasks assigned to the caller
pub async fn my_tasks(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Vec<TaskResponse>>> {
    principal.authorize(STAFF)?;
    let list = tasks::list_for_employee(&state.db, principal.employee_id).await?;
    Ok(Json(list.into_iter().map(TaskResponse::from).collect()))
}

pub async fn get_task(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(task_id): ApiPath<i32>,
) -> AppResult<Json<TaskResponse>> {
    principal.authorize(STAFF)?;
    let task = tasks::get_task(&state.db, task_id).await?;
    Ok(Json(task.into()))
}

pub async fn update_task(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(task_id): ApiPath<i32>,
    ApiJson(request): ApiJson<TaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    principal.authorize(MANAGEMENT)?;
    let task = tasks::update_task(&state.db, task_id, request).await?;
    Ok(Json(task.into()))
}

pub async fn update_task_status(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(task_id): ApiPath<i32>,
    ApiJson(request): ApiJson<TaskStatusRequest>,
) -> AppResult<Json<TaskResponse>> {
    principal.authorize(MANAGEMENT)?;
    let task = tasks::update_status(&state.db, task_id, request.status).await?;
    Ok(Json(task.into()))
}

pub async fn delete_task(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(task_id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    principal.authorize(MANAGEMENT)?;
    tasks::delete_task(&state.db, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
