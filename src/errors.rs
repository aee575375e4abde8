use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use thiserror::Error;

use crate::models::ErrorEnvelope;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error ({code}): {source}")]
    Db {
        code: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("Validation error: {0}")]
    Validation(&'static str),
    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    /// Returns a mapper that tags a database failure with the error code the
    /// client is allowed to see.
    pub fn db(code: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Db { code, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Db { code, .. } => *code,
            AppError::Validation(code) => *code,
            AppError::Unauthorized => "unauthorized",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // The database source never leaves the process; it is logged by the handler.
        (self.status(), Json(ErrorEnvelope::new(self.code()))).into_response()
    }
}
