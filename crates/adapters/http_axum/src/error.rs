//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use citas_domain::error::{CitasError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CitasError`] to an HTTP response with appropriate status code.
pub struct ApiError {
    error: CitasError,
    not_found_status: StatusCode,
}

impl ApiError {
    /// Render [`CitasError::NotFound`] as `401 Unauthorized`.
    ///
    /// Used by credential checks, where an unknown account is a failed login.
    #[must_use]
    pub fn unauthorized_if_not_found(error: CitasError) -> Self {
        Self {
            error,
            not_found_status: StatusCode::UNAUTHORIZED,
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.error {
            CitasError::Validation(_) | CitasError::Duplicate(_) => {
                (StatusCode::BAD_REQUEST, self.error.to_string())
            }
            CitasError::NotFound(_) => (self.not_found_status, self.error.to_string()),
            CitasError::Authentication(_) => (StatusCode::UNAUTHORIZED, self.error.to_string()),
            CitasError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }
}

impl From<CitasError> for ApiError {
    fn from(error: CitasError) -> Self {
        Self {
            error,
            not_found_status: StatusCode::NOT_FOUND,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        CitasError::from(err).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        ValidationError::MalformedBody.into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
