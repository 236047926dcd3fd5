//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::FieldError;
use saga::SagaError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// One or more form fields failed validation.
    Validation(Vec<FieldError>),
    /// The requested gym code is already taken.
    CodeConflict(String),
    /// The registration saga terminated in failure.
    RegistrationFailed(String),
    /// Saga precondition error.
    Saga(SagaError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let fields: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "field": e.field,
                            "message": e.message(),
                        })
                    })
                    .collect();
                let body = serde_json::json!({
                    "error": "validation failed",
                    "fields": fields,
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            ApiError::CodeConflict(message) => error_body(StatusCode::CONFLICT, message),
            ApiError::RegistrationFailed(message) => {
                error_body(StatusCode::BAD_GATEWAY, message)
            }
            ApiError::Saga(err) => saga_error_to_response(err),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal server error");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    let body = serde_json::json!({ "error": message });
    (status, axum::Json(body)).into_response()
}

fn saga_error_to_response(err: SagaError) -> Response {
    match &err {
        SagaError::NotAcknowledged => error_body(StatusCode::BAD_REQUEST, err.to_string()),
        SagaError::DuplicateCode { .. } => error_body(StatusCode::CONFLICT, err.to_string()),
        _ => error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<SagaError> for ApiError {
    fn from(err: SagaError) -> Self {
        ApiError::Saga(err)
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}
