use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{Principal, MANAGEMENT};
use crate::entities::employees::EmployeeRole;
use crate::error::AppResult;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::models::employee::{
    EmployeeCreateResponse, EmployeeRequest, EmployeeResponse, PasswordResetResponse,
};
use crate::services::employees;
use crate::AppState;

pub async fn create_employee(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<EmployeeRequest>,
) -> AppResult<(StatusCode, Json<EmployeeCreateResponse>)> {
    principal.authorize(MANAGEMENT)?;
    let account = employees::create_employee(&state.db, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(EmployeeCreateResponse {
            employee: account.employee.into(),
            password: account.password,
        }),
    ))
}

pub async fn list_employees(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    principal.authorize(MANAGEMENT)?;
    let list = employees::list_employees(&state.db).await?;
    Ok(Json(list.into_iter().map(EmployeeResponse::from).collect()))
}

/// `GET /employees/role/employee`: candidates for task assignment
pub async fn list_floor_employees(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    principal.authorize(MANAGEMENT)?;
    let list = employees::list_by_role(&state.db, EmployeeRole::Employee).await?;
    Ok(Json(list.into_iter().map(EmployeeResponse::from).collect()))
}

pub async fn get_employee(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(employee_id): ApiPath<i32>,
) -> AppResult<Json<EmployeeResponse>> {
    principal.authorize(MANAGEMENT)?;
    let employee = employees::get_employee(&state.db, employee_id).await?;
    Ok(Json(employee.into()))
}

pub async fn update_employee(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(employee_id): ApiPath<i32>,
    ApiJson(request): ApiJson<EmployeeRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    principal.authorize(MANAGEMENT)?;
    let employee = employees::update_employee(&state.db, employee_id, request).await?;
    Ok(Json(employee.into()))
}

pub async fn reset_password(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(employee_id): ApiPath<i32>,
) -> AppResult<Json<PasswordResetResponse>> {
    principal.authorize(MANAGEMENT)?;
    let password = employees::reset_password(&state.db, employee_id).await?;
    Ok(Json(PasswordResetResponse { password }))
}
