//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::coordinator::{CoordinatorError, FieldError};
use crate::stay::StayError;

/// Application-level error type for the back-office.
#[derive(Debug, Error)]
pub enum AppError {
    /// Stay API operation failed.
    #[error("Stay API error: {0}")]
    Stay(#[from] StayError),

    /// Form validation failed; field-keyed messages for the client.
    #[error("Validation failed ({} fields)", .0.len())]
    Validation(Vec<FieldError>),

    /// Transient failure the operator should retry.
    #[error("{0}")]
    Notice(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operator session is missing or expired.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoordinatorError> for AppError {
    fn from(err: CoordinatorError) -> Self {
        match err {
            CoordinatorError::Invalid(errors) => Self::Validation(errors),
            CoordinatorError::Notice(message) => Self::Notice(message),
            CoordinatorError::NotFound(resource) => Self::NotFound(resource),
            CoordinatorError::Unauthorized => {
                Self::Unauthorized("Session expired. Please sign in again.".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry; validation noise stays out
        if matches!(self, Self::Stay(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Stay(err) => match err {
                StayError::NotFound(_) => StatusCode::NOT_FOUND,
                StayError::Unauthorized => StatusCode::UNAUTHORIZED,
                StayError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                StayError::Http(_) | StayError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Notice(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose transport details to clients
        let body = match &self {
            Self::Validation(errors) => json!({ "errors": errors }),
            Self::Stay(StayError::Http(_) | StayError::Parse(_)) => {
                json!({ "message": "Upstream service error" })
            }
            Self::Internal(_) => json!({ "message": "Internal server error" }),
            _ => json!({ "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("room 123".to_string());
        assert_eq!(err.to_string(), "Not found: room 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Validation(vec![FieldError::new("name", "x")])),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_stay_error_mapping() {
        assert_eq!(
            get_status(AppError::Stay(StayError::NotFound("room 1".to_string()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Stay(StayError::Unauthorized)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Stay(StayError::Rejected {
                status: 400,
                field: None,
                message: "nope".to_string(),
            })),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_coordinator_error_conversion() {
        let err: AppError = CoordinatorError::Invalid(vec![FieldError::new("email", "bad")]).into();
        assert!(matches!(err, AppError::Validation(ref e) if e.len() == 1));

        let err: AppError = CoordinatorError::Notice("try again".to_string()).into();
        assert_eq!(get_status(err), StatusCode::BAD_GATEWAY);

        let err: AppError = CoordinatorError::NotFound("users/4".to_string()).into();
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);

        let err: AppError = CoordinatorError::Unauthorized.into();
        assert_eq!(get_status(err), StatusCode::UNAUTHORIZED);
    }
}
