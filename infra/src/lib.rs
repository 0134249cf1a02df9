//! # Infrastructure Layer
//!
//! Concrete persistence for the to-do API. The domain crate defines the
//! repository traits; this crate implements them on MySQL through SQLx.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//!
//! The DDL the repositories expect lives in `sql/schema.sql`.

use todo_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Storage {
            message: err.to_string(),
        }
    }
}
