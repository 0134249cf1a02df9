//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Repository pattern implementations
//! - Mapping of driver errors onto domain errors

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlTodoRepository, MySqlUserRepository};

use todo_core::errors::{AuthError, DomainError};

/// Map a driver error onto a domain storage error
pub(crate) fn storage_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::Storage {
        message: format!("{}: {}", context, err),
    }
}

/// Map an insert error, turning a unique-key violation into `DuplicateIdentity`
pub(crate) fn insert_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AuthError::DuplicateIdentity.into();
        }
    }
    storage_error(context, err)
}

/// Map a column decoding error
pub(crate) fn column_error(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column {}: {}", column, err),
    }
}
