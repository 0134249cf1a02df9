//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::token::{IssuedToken, TokenPurpose};

/// Password state of a user record
///
/// A credential is `Pending` from the moment a plaintext is set until the
/// store hashes it, and `Hashed` afterwards. Only pending credentials are
/// ever hashed, so a stored hash is never hashed a second time.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Pending(String),
    Hashed(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Pending(_) => f.write_str("Pending(<redacted>)"),
            Credential::Hashed(_) => f.write_str("Hashed(<redacted>)"),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized (trimmed, lowercased) email address
    pub email: String,

    credential: Credential,

    tokens: Vec<IssuedToken>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

/// Outward representation of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
}

impl User {
    /// Creates a new, not yet persisted user with a pending credential
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            credential: Credential::Pending(password.into()),
            tokens: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a user loaded from a store
    pub fn from_stored(
        id: Uuid,
        email: String,
        password_hash: String,
        tokens: Vec<IssuedToken>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            credential: Credential::Hashed(password_hash),
            tokens,
            created_at,
            updated_at,
        }
    }

    /// Replaces the credential with a new plaintext awaiting hashing
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.credential = Credential::Pending(password.into());
        self.updated_at = Utc::now();
    }

    /// Plaintext awaiting hashing, if the credential changed since the last persist
    pub fn pending_password(&self) -> Option<&str> {
        match &self.credential {
            Credential::Pending(plaintext) => Some(plaintext),
            Credential::Hashed(_) => None,
        }
    }

    /// Records the hash computed for the pending credential
    pub fn mark_password_hashed(&mut self, hash: String) {
        self.credential = Credential::Hashed(hash);
    }

    /// Stored hash; `None` while the credential is still pending
    pub fn password_hash(&self) -> Option<&str> {
        match &self.credential {
            Credential::Hashed(hash) => Some(hash),
            Credential::Pending(_) => None,
        }
    }

    /// Tokens in issuance order
    pub fn tokens(&self) -> &[IssuedToken] {
        &self.tokens
    }

    /// Checks whether `token` is a live token of the given purpose
    pub fn has_token(&self, token: &str, purpose: TokenPurpose) -> bool {
        self.tokens.iter().any(|t| t.matches(token, purpose))
    }

    /// Appends an issued token
    pub fn add_token(&mut self, token: IssuedToken) {
        self.tokens.push(token);
    }

    /// Removes every entry equal to `token`; returns whether anything was removed
    pub fn remove_token(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t.token != token);
        before != self.tokens.len()
    }

    /// Public projection: id and email only
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

// Only the public projection is ever serialized.
impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.profile().serialize(serializer)
    }
}
