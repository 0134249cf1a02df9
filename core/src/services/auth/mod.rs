//! Authentication service module
//!
//! This module provides the user-facing authentication operations:
//! - Registration with email and password
//! - Token issuance, resolution and removal
//! - Login with credentials
//! - Password change

mod resolver;
mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use resolver::TokenResolver;
pub use service::AuthService;
pub use validation::{validate_email, validate_password, MAX_PASSWORD_BYTES};
