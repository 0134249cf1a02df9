//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{
    AuthError, AuthenticationFailure, CredentialFailure, TokenError, ValidationError,
};

use thiserror::Error;

/// Coarse error classification exposed to callers outside the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    DuplicateIdentity,
    AuthenticationRequired,
    CredentialMismatch,
    NotFound,
    Internal,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Collapse the structured cause into the kind callers act on
    ///
    /// A rejected token is reported as `AuthenticationRequired`: callers
    /// cannot tell a forged token from a revoked or unknown one.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::ValidationFailed,
            DomainError::Auth(AuthError::DuplicateIdentity) => ErrorKind::DuplicateIdentity,
            DomainError::Auth(AuthError::AuthenticationRequired(_)) => {
                ErrorKind::AuthenticationRequired
            }
            DomainError::Auth(AuthError::CredentialMismatch(_)) => ErrorKind::CredentialMismatch,
            DomainError::Token(TokenError::Rejected) => ErrorKind::AuthenticationRequired,
            DomainError::Token(TokenError::GenerationFailed) => ErrorKind::Internal,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Storage { .. } | DomainError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for a missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for a store failure
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
