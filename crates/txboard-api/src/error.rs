//! Error types for txboard-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use txboard_core::{CoreError, ErrorCode};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(error) => match error.code() {
                ErrorCode::InvalidMonth | ErrorCode::EmptySelection => StatusCode::BAD_REQUEST,
                ErrorCode::NoUser => StatusCode::CONFLICT,
                ErrorCode::FetchFailed | ErrorCode::DeleteFailed => StatusCode::BAD_GATEWAY,
                ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Core(error) => serde_json::to_value(error.to_details()).unwrap_or_default(),
            other => serde_json::json!({ "message": other.to_string() }),
        };
        if status.is_server_error() {
            log::error!("{} -> {}", self, status);
        } else {
            log::debug!("{} -> {}", self, status);
        }
        (status, axum::Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
