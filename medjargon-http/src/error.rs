//! Error handling for medjargon-http
//!
//! Maps service errors onto HTTP status codes with a `{"error": ...}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medjargon_core::Error;
use serde_json::json;
use std::cmp::PartialEq;
use tracing::{debug, error};

/// Application error type
#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl PartialEq<StatusCode> for AppError {
    fn eq(&self, status_code: &StatusCode) -> bool {
        let (error_status, _) = self.status_and_message();
        &error_status == status_code
    }
}

impl AppError {
    /// Get the status code and error message for this error
    pub fn status_and_message(&self) -> (StatusCode, String) {
        let status = match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::TermNotFound(_) | Error::DefinitionNotFound { .. } => StatusCode::NOT_FOUND,
            Error::IdentifierUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Provider(_) => StatusCode::BAD_GATEWAY,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::LexiconLoad(_) | Error::Config(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.0.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        if status.is_server_error() {
            error!("{}: {}", status, error_message);
        } else {
            debug!("{}: {}", status, error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
