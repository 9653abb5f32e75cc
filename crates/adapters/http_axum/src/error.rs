//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hoo_domain::error::{DeviceError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps handler failures to an HTTP response with an appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// The bridge refused or failed the operation.
    Device(DeviceError),
    /// A path or query parameter could not be parsed.
    BadRequest(String),
}

impl From<DeviceError> for ApiError {
    fn from(err: DeviceError) -> Self {
        Self::Device(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Device(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Device(DeviceError::InvalidValue(err)) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Device(DeviceError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Device(err) => {
                tracing::error!(error = %err, "bridge error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
