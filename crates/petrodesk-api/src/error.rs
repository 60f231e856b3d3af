//! Maps domain `AppError` to HTTP responses.
//!
//! `AppError` lives in petrodesk-core and `IntoResponse` in axum, so the
//! conversion goes through the local `ApiError` newtype. Handlers return
//! [`ApiResult`]; `?` lifts any `AppError` into it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use petrodesk_core::error::{AppError, ErrorKind};

/// `AppError` carried across the axum response boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Handler result type: any `AppError` converts via `?`.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            kind => {
                tracing::error!(kind = %kind, error = %err.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message.clone(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_409() {
        let resp = ApiError::from(AppError::conflict("busy")).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let resp = ApiError::from(AppError::database("down")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_question_mark_lifts_app_error() {
        fn fails() -> ApiResult<()> {
            fn inner() -> Result<(), AppError> {
                Err(AppError::not_found("missing"))
            }
            inner()?;
            Ok(())
        }
        let err = fails().err().map(|e| e.0.kind);
        assert_eq!(err, Some(ErrorKind::NotFound));
    }
}
