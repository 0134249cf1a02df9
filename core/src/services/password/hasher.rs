//! bcrypt-backed credential hasher

use todo_shared::config::PasswordConfig;

use crate::errors::DomainError;

/// One-way password transform and verification
///
/// Hashes are salted, so hashing the same plaintext twice yields different
/// strings; `verify` recovers the salt and cost from the stored hash.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher with an explicit bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.hash_cost)
    }

    /// Hash a plaintext password
    pub fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    /// Check a plaintext against a stored hash
    ///
    /// A malformed hash verifies as `false`.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    /// [`hash`](Self::hash) on the blocking thread pool
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, DomainError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }

    /// [`verify`](Self::verify) on the blocking thread pool
    pub async fn verify_blocking(&self, plaintext: String, hash: String) -> bool {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::from_config(&PasswordConfig::fast())
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hasher().hash("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").unwrap();

        assert!(hasher.verify("secret1", &hash));
        assert!(!hasher.verify("secret2", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        let hasher = hasher();
        assert!(!hasher.verify("secret1", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("secret1", ""));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(PasswordHasher::new(2).hash("secret1").is_err());
    }

    #[tokio::test]
    async fn test_blocking_variants() {
        let hasher = hasher();
        let hash = hasher.hash_blocking("secret1".to_string()).await.unwrap();

        assert!(hasher.verify_blocking("secret1".to_string(), hash.clone()).await);
        assert!(!hasher.verify_blocking("nope".to_string(), hash).await);
    }
}
