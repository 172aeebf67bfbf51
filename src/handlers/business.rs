use axum::{extract::State, Json};

use crate::auth::{Principal, MANAGEMENT};
use crate::error::AppResult;
use crate::handlers::extract::ApiJson;
use crate::models::business::{BusinessRequest, BusinessResponse};
use crate::services::business;
use crate::AppState;

pub async fn get_business(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<BusinessResponse>> {
    principal.authorize(MANAGEMENT)?;
    let profile = business::get_business(&state.db).await?;
    Ok(Json(profile.into()))
}

pub async fn update_business(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<BusinessRequest>,
) -> AppResult<Json<BusinessResponse>> {
    principal.authorize(MANAGEMENT)?;
    let profile = business::upsert_business(&state.db, request).await?;
    Ok(Json(profile.into()))
}
