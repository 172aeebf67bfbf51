use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::handlers::extract::ApiJson;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::services::login;
use crate::AppState;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let token = login::login(&state.db, &state.jwt, &request.username, &request.password).await?;
    Ok(Json(LoginResponse { token }))
}
