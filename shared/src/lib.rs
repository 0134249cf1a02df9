//! Shared utilities and common types for the to-do API server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Validation helpers (email, password length)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    PasswordConfig, ServerConfig, StorageBackend, TokenConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
