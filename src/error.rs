//! Typed errors and HTTP mapping.

use crate::response::MessageBody;
use crate::service::ValidationFailure;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationFailure),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(failure) => {
                tracing::debug!(%failure, "rejected request body");
                (status, Json(failure)).into_response()
            }
            AppError::NotFound(message) | AppError::Conflict(message) => {
                tracing::debug!(%status, %message, "request refused");
                (status, Json(MessageBody::new(message))).into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "request failed");
                (status, Json(MessageBody::new(INTERNAL_ERROR))).into_response()
            }
        }
    }
}
