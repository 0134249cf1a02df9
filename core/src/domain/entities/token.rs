//! Token entities for signed, opaque bearer tokens.

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a token may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// Authenticates API requests
    Auth,
}

impl TokenPurpose {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Auth => "auth",
        }
    }
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auth" => Ok(TokenPurpose::Auth),
            _ => Err(format!("Unknown token purpose: {}", s)),
        }
    }
}

/// A token issued to a user and still accepted by the store
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub purpose: TokenPurpose,
    pub token: String,
}

impl IssuedToken {
    pub fn new(purpose: TokenPurpose, token: impl Into<String>) -> Self {
        Self {
            purpose,
            token: token.into(),
        }
    }

    /// Compare against a presented token without leaking timing on the token bytes
    pub fn matches(&self, token: &str, purpose: TokenPurpose) -> bool {
        self.purpose == purpose && constant_time_eq(self.token.as_bytes(), token.as_bytes())
    }
}

// Token strings are bearer credentials and must not reach logs.
impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("purpose", &self.purpose)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id
    #[serde(rename = "_id")]
    pub user_id: String,

    /// Token purpose
    pub access: TokenPurpose,

    /// Issued at timestamp
    pub iat: i64,

    /// Issuer
    pub iss: String,

    /// Random per-issuance id so two tokens for the same user never collide
    pub jti: String,
}

impl Claims {
    /// Creates claims for a freshly issued token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owning user's UUID
    /// * `purpose` - What the token may be used for
    /// * `issuer` - Issuer claim, checked again on decode
    pub fn new(user_id: Uuid, purpose: TokenPurpose, issuer: impl Into<String>) -> Self {
        Self {
            user_id: user_id.to_string(),
            access: purpose,
            iat: Utc::now().timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.user_id)
    }
}

/// Result of a successful decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedToken {
    pub user_id: Uuid,
    pub purpose: TokenPurpose,
}
