//! Typed API error for HTTP handlers.
//!
//! Converts service errors into `{"success": false, "error": "..."}` bodies.
//! The caller is an operator, so the error message is returned as-is.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use spott_service::ServiceError;

use crate::response_types::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    /// 409 Conflict: a cleanup run is already in progress.
    Conflict(String),
    /// 500 Internal Server Error.
    Internal(ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "duplicate cleanup failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            },
        };
        (status, Json(ErrorResponse { success: false, error })).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_conflict() { Self::Conflict(err.to_string()) } else { Self::Internal(err) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_running_maps_to_conflict() {
        let response = ApiError::from(ServiceError::AlreadyRunning).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn system_error_maps_to_500() {
        let err = ServiceError::System(anyhow::anyhow!("boom"));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
