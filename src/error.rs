//! Application error type
//!
//! Every service returns [`AppResult`]. Callers branch on [`AppError::kind`],
//! never on message text. Store failures carry the operation that failed via
//! [`DbResultExt::context`].

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::common::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

/// Error classification, compared by equality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidState,
    Conflict,
    InsufficientStock,
    CapacityExceeded,
    Unauthorized,
    Forbidden,
    Internal,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Operation illegal for the entity's current status
    #[error("{0}")]
    InvalidState(String),

    /// Would break a uniqueness rule or an order/table pairing
    #[error("{0}")]
    Conflict(String),

    #[error(
        "insufficient stock for item {item_name} (ID: {item_id}). Available: {available}, Requested: {requested}"
    )]
    InsufficientStock {
        item_name: String,
        item_id: i32,
        available: i32,
        requested: i32,
    },

    #[error("{0}")]
    CapacityExceeded(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::InvalidState(_) => ErrorKind::InvalidState,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            AppError::CapacityExceeded(_) => ErrorKind::CapacityExceeded,
            AppError::Unauthorized(_) => ErrorKind::Unauthorized,
            AppError::Forbidden(_) => ErrorKind::Forbidden,
            AppError::Database { .. } | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation
            | ErrorKind::InvalidState
            | ErrorKind::Conflict
            | ErrorKind::InsufficientStock
            | ErrorKind::CapacityExceeded => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed with internal error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

/// Attach operation context to store failures
pub trait DbResultExt<T> {
    fn context(self, context: &'static str) -> AppResult<T>;
}

impl<T> DbResultExt<T> for Result<T, DbErr> {
    fn context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|source| match source.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(format!("{context}: record already exists"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::Conflict(format!("{context}: record is referenced by other records"))
            }
            _ => AppError::Database { context, source },
        })
    }
}
