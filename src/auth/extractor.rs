//! Bearer-token principal extractor

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::{JwtError, JwtService};
use crate::entities::employees::EmployeeRole;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Authenticated employee identity taken from the request's JWT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub employee_id: i32,
    pub role: EmployeeRole,
}

impl Principal {
    /// Reject with 403 unless the principal's role is in `allowed`
    pub fn authorize(&self, allowed: &[EmployeeRole]) -> AppResult<()> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            tracing::warn!(
                employee_id = self.employee_id,
                role = ?self.role,
                "Insufficient permissions"
            );
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(*principal);
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authorization header required".to_string()))?;

        let token = JwtService::extract_from_header(header).ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let claims = state.jwt.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, uri = %parts.uri, "Token rejected");
            match e {
                JwtError::ExpiredToken => AppError::Unauthorized("Token expired".to_string()),
                _ => AppError::Unauthorized("Invalid or expired token".to_string()),
            }
        })?;

        let principal = Principal {
            employee_id: claims.employee_id,
            role: claims.role,
        };
        parts.extensions.insert(principal);

        Ok(principal)
    }
}
