//! Error type definitions for authentication, token handling and validation
//!
//! Causes are kept structured for logs and tests. The `Display` text of the
//! authentication variants is deliberately identical per kind so that nothing
//! rendered from it distinguishes, for example, an unknown email from a wrong
//! password.

use thiserror::Error;

/// Why a presented token did not resolve to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationFailure {
    /// No token was presented
    MissingToken,
    /// Signature, format or claims did not verify
    InvalidToken,
    /// Token verified but the user or the token entry is gone
    UnknownToken,
}

/// Why an email/password pair did not resolve to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownEmail,
    WrongPassword,
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired(AuthenticationFailure),

    #[error("Authentication failed")]
    CredentialMismatch(CredentialFailure),

    #[error("Email already registered")]
    DuplicateIdentity,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed, wrongly signed, forged or otherwise unverifiable token
    #[error("Token rejected")]
    Rejected,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("{field} must be at most {max} bytes (got {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the offending field, when there is one
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. } => field,
            ValidationError::InvalidEmail => "email",
        }
    }
}
