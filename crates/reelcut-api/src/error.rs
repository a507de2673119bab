//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            tracing::error!(error = %source, "Internal server error");
        }

        let body = json!({
            "success": false,
            "message": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<reelcut_store::StoreError> for ApiError {
    fn from(err: reelcut_store::StoreError) -> Self {
        match err {
            reelcut_store::StoreError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            reelcut_store::StoreError::Duplicate(what) => {
                Self::Conflict(format!("{what} already in use"))
            }
            other => Self::Internal(other.into()),
        }
    }
}

impl From<reelcut_queue::QueueError> for ApiError {
    fn from(err: reelcut_queue::QueueError) -> Self {
        Self::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_the_specified_status_codes() {
        assert_eq!(
            ApiError::validation("bad url").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("job").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::rate_limited("slow down").status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
