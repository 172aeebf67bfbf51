use sea_orm::DatabaseConnection;

use crate::auth::password::verify_password;
use crate::auth::JwtService;
use crate::error::{AppError, AppResult};
use crate::services::employees;

const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Check credentials and issue a bearer token
///
/// Unknown usernames and wrong passwords fail identically.
pub async fn login(
    db: &DatabaseConnection,
    jwt: &JwtService,
    username: &str,
    password: &str,
) -> AppResult<String> {
    let Some(employee) = employees::find_by_username(db, username).await? else {
        tracing::warn!(username, "Login failed: unknown username");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password(password, &employee.password_hash) {
        tracing::warn!(username, "Login failed: wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = jwt
        .issue_token(employee.id, employee.role)
        .map_err(|e| AppError::Internal(format!("failed to issue token: {e}")))?;

    tracing::info!(employee_id = employee.id, "Employee logged in");
    Ok(token)
}
