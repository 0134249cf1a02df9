//! Common validation utilities

pub use super::email::{is_valid_email, normalize_email};

/// Check if a string has at least `min` characters (Unicode scalar values)
pub fn meets_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Check if a string is not empty after trimming
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meets_min_length_counts_chars() {
        assert!(meets_min_length("secret", 6));
        assert!(!meets_min_length("short", 6));
        // six characters, more than six bytes
        assert!(meets_min_length("éééééé", 6));
        assert!(!meets_min_length("ééééé", 6));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank(" x "));
        assert!(!not_blank("   "));
        assert!(!not_blank(""));
    }
}
