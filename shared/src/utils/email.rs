//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum total length of an address (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of the local part
pub const MAX_LOCAL_PART_LENGTH: usize = 64;

// local@domain.tld, no whitespace, at least one dot in the domain
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$").unwrap()
});

/// Normalize an email address: trim surrounding whitespace and lowercase
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an already-normalized email address is well formed
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    if !EMAIL_REGEX.is_match(email) {
        return false;
    }

    let Some((local, _domain)) = email.rsplit_once('@') else {
        return false;
    };

    local.len() <= MAX_LOCAL_PART_LENGTH
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
}

/// Mask an email address for logs (e.g., a***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => String::from("***"),
    }
}
