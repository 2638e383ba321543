use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::ValidationError;

/// Custom error type for request handlers
///
/// Every variant maps to a status code and a plain-text body. Store failures
/// are logged with their full context and reported as a bare 500; they are
/// never retried.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed management request
    Validation(ValidationError),
    /// No mapping for the requested path
    NotFound,
    /// Store operation error
    Store(anyhow::Error),
    /// A stored target that no longer parses as a URL
    CorruptTarget { key: String, source: url::ParseError },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            ApiError::Store(err) => {
                tracing::error!("Store error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            ApiError::CorruptTarget { key, source } => {
                tracing::error!("Stored target for {} is not a valid URL: {}", key, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Store(err)
    }
}
