//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes written into [`ErrorResponse::error`]
pub mod error_codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const DUPLICATE_IDENTITY: &str = "duplicate_identity";
    /// Shared by missing/revoked tokens and bad login credentials
    pub const AUTHENTICATION_FAILED: &str = "authentication_failed";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::new(error_codes::NOT_FOUND, "Todo not found");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Todo not found");
        assert!(json.get("details").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::new(error_codes::VALIDATION_FAILED, "Validation failed")
            .add_detail("field", "email");

        let details = response.details.unwrap();
        assert_eq!(details["field"], serde_json::json!("email"));
    }
}
