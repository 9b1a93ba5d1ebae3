use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::constants::GENERIC_ERROR_BODY;
use crate::services::ServiceError;

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),

    UpstreamError(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::UpstreamError(msg) => write!(f, "Upstream fetch error: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Bad input gets a 400 with the reason; every other failure is logged in
/// full and answered with the same opaque 500.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ValidationError(msg) => {
                tracing::debug!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone()).into_response()
            }
            ApiError::UpstreamError(msg) => {
                tracing::error!("Upstream fetch error: {}", msg);
                internal_error()
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                internal_error()
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_BODY).into_response()
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Fetch(e) => ApiError::UpstreamError(e.to_string()),
            ServiceError::Store(e) => ApiError::DatabaseError(e.to_string()),
            ServiceError::InvalidQuery(msg) => ApiError::ValidationError(msg),
            e @ ServiceError::UnknownLocation(_) => ApiError::ValidationError(e.to_string()),
            e @ ServiceError::LocationConflict(_) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }
}
