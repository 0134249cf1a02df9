//! Input validation run before anything is persisted

use todo_shared::utils::{is_valid_email, meets_min_length, normalize_email};

use crate::errors::ValidationError;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Validate an email address and return its normalized form
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

/// Validate a plaintext password
///
/// The minimum is counted in characters, the maximum in bytes: past
/// [`MAX_PASSWORD_BYTES`] two different passwords would hash alike.
pub fn validate_password(password: &str, min_length: usize) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "password".to_string(),
        });
    }
    if !meets_min_length(password, min_length) {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: min_length,
            actual: password.chars().count(),
        });
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_BYTES,
            actual: password.len(),
        });
    }
    Ok(())
}
