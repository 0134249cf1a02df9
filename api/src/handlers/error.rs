//! Mapping from domain errors to HTTP responses
//!
//! Every failure leaving a handler goes through [`ApiError`], which renders
//! the shared [`ErrorResponse`] body. Authentication failures of any cause
//! collapse to one 401 body so a client cannot probe which part was wrong.

use std::collections::HashMap;

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use todo_core::errors::{DomainError, ErrorKind};
use todo_shared::{error_codes, ErrorResponse};

const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed";
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Error type returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request DTO failed its declarative checks
    #[error("Validation failed")]
    InvalidRequest(#[from] validator::ValidationErrors),

    /// Body was not JSON or did not match the expected shape
    #[error("Invalid request body: {0}")]
    Payload(String),
}

impl ApiError {
    /// Kind used for status selection
    fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Domain(e) => e.kind(),
            ApiError::InvalidRequest(_) | ApiError::Payload(_) => ErrorKind::ValidationFailed,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Domain(error) => domain_body(error),
            ApiError::InvalidRequest(errors) => {
                let mut fields: HashMap<String, Vec<String>> = HashMap::new();
                for (field, errors) in errors.field_errors() {
                    let codes = errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    fields.insert(field.to_string(), codes);
                }
                ErrorResponse::new(error_codes::VALIDATION_FAILED, "Validation failed")
                    .add_detail("fields", fields)
            }
            ApiError::Payload(message) => {
                ErrorResponse::new(error_codes::VALIDATION_FAILED, message.clone())
            }
        }
    }
}

fn domain_body(error: &DomainError) -> ErrorResponse {
    match error.kind() {
        ErrorKind::ValidationFailed => {
            let response = ErrorResponse::new(error_codes::VALIDATION_FAILED, error.to_string());
            match error {
                DomainError::Validation(v) => response.add_detail("field", v.field()),
                _ => response,
            }
        }
        ErrorKind::DuplicateIdentity => {
            ErrorResponse::new(error_codes::DUPLICATE_IDENTITY, error.to_string())
        }
        ErrorKind::AuthenticationRequired | ErrorKind::CredentialMismatch => {
            ErrorResponse::new(error_codes::AUTHENTICATION_FAILED, AUTHENTICATION_FAILED_MESSAGE)
        }
        ErrorKind::NotFound => ErrorResponse::new(error_codes::NOT_FOUND, error.to_string()),
        ErrorKind::Internal => {
            ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorKind::DuplicateIdentity => StatusCode::CONFLICT,
            ErrorKind::AuthenticationRequired | ErrorKind::CredentialMismatch => {
                StatusCode::UNAUTHORIZED
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        HttpResponse::build(status).json(self.body())
    }
}

/// Render JSON extractor failures with the shared error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Payload(err.to_string()).into()
}
