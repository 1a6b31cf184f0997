//! HTTP error rendering
//!
//! Application failures map onto status codes here. Every error leaves the
//! service as a JSON body `{"detail": <message>}`, the shape the reference
//! front end consumes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use switchboard_application::{GatewayError, HistoryError, ProcessQueryError, RegistryError};
use switchboard_domain::DomainError;

/// A handler failure ready to be rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

fn registry_status(error: &RegistryError) -> StatusCode {
    match error {
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
        RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<RegistryError> for ApiError {
    fn from(error: RegistryError) -> Self {
        Self::new(registry_status(&error), error.to_string())
    }
}

/// Pipeline failures: registry faults keep their registry mapping, upstream
/// faults are gateway problems, shutdown surfaces as service-unavailable.
impl From<ProcessQueryError> for ApiError {
    fn from(error: ProcessQueryError) -> Self {
        let status = match &error {
            ProcessQueryError::Registry(inner) => {
                return Self::new(registry_status(inner), inner.to_string());
            }
            ProcessQueryError::NoAgentAvailable | ProcessQueryError::Cancelled => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ProcessQueryError::Upstream(GatewayError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ProcessQueryError::Upstream(_) | ProcessQueryError::InvalidVerdict(_) => {
                StatusCode::BAD_GATEWAY
            }
            ProcessQueryError::State(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let status = if error.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status, error.to_string())
    }
}

impl From<HistoryError> for ApiError {
    fn from(error: HistoryError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
    }
}
