//! Common utility functions

pub mod email;
pub mod validation;

// Re-export commonly used utilities
pub use email::*;
pub use validation::{meets_min_length, not_blank};
