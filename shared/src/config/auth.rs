//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, ConfigError, Environment};

/// Signing secret used when `JWT_SECRET` is not provided
pub const DEFAULT_TOKEN_SECRET: &str = "development-secret-please-change-in-production";

/// Issuer claim embedded in every token
pub const DEFAULT_TOKEN_ISSUER: &str = "todo-api";

/// Minimum accepted password length; configuration may raise it but not lower it
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Longest accepted issuer claim; issued tokens must fit the 512-byte token column
pub const MAX_ISSUER_LENGTH: usize = 64;

/// Default bcrypt work factor
pub const DEFAULT_HASH_COST: u32 = 10;

const MIN_PRODUCTION_SECRET_LENGTH: usize = 32;

/// Token signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// HMAC secret used to sign and verify tokens
    pub secret: String,

    /// Issuer claim written into and required from every token
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_TOKEN_SECRET),
            issuer: default_issuer(),
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Override the issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_TOKEN_SECRET
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_TOKEN_SECRET.to_string()),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| default_issuer()),
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    pub hash_cost: u32,

    /// Minimum number of characters a plaintext password must have
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            hash_cost: DEFAULT_HASH_COST,
            min_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordConfig {
    /// Lowest cost bcrypt accepts; meant for tests
    pub fn fast() -> Self {
        Self {
            hash_cost: 4,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            hash_cost: env_parse("PASSWORD_HASH_COST", DEFAULT_HASH_COST)?,
            min_length: env_parse("PASSWORD_MIN_LENGTH", DEFAULT_MIN_PASSWORD_LENGTH)?,
        })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token signing configuration
    pub token: TokenConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            token: TokenConfig::from_env(),
            password: PasswordConfig::from_env()?,
        })
    }

    /// Configuration suited to unit and integration tests
    pub fn for_tests() -> Self {
        Self {
            token: TokenConfig::new("test-secret"),
            password: PasswordConfig::fast(),
        }
    }

    /// Validate the configuration for the given environment
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.password.hash_cost) {
            return Err(ConfigError::InvalidValue {
                key: "PASSWORD_HASH_COST".to_string(),
                value: self.password.hash_cost.to_string(),
            });
        }
        if self.password.min_length < DEFAULT_MIN_PASSWORD_LENGTH {
            return Err(ConfigError::InvalidValue {
                key: "PASSWORD_MIN_LENGTH".to_string(),
                value: self.password.min_length.to_string(),
            });
        }
        if self.token.issuer.is_empty() || self.token.issuer.len() > MAX_ISSUER_LENGTH {
            return Err(ConfigError::InvalidValue {
                key: "JWT_ISSUER".to_string(),
                value: self.token.issuer.clone(),
            });
        }
        if environment.is_production() {
            if self.token.is_using_default_secret() {
                return Err(ConfigError::Insecure {
                    reason: "JWT_SECRET must be set in production".to_string(),
                });
            }
            if self.token.secret.len() < MIN_PRODUCTION_SECRET_LENGTH {
                return Err(ConfigError::Insecure {
                    reason: format!(
                        "JWT_SECRET must be at least {} bytes in production",
                        MIN_PRODUCTION_SECRET_LENGTH
                    ),
                });
            }
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    String::from(DEFAULT_TOKEN_ISSUER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_default() {
        let config = TokenConfig::default();
        assert_eq!(config.issuer, "todo-api");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_token_config_builder() {
        let config = TokenConfig::new("my-secret").with_issuer("other");
        assert_eq!(config.issuer, "other");
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_password_config_defaults() {
        let config = PasswordConfig::default();
        assert_eq!(config.hash_cost, 10);
        assert_eq!(config.min_length, 6);
        assert_eq!(PasswordConfig::fast().hash_cost, 4);
    }

    #[test]
    fn test_validate_rejects_bad_cost() {
        let mut config = AuthConfig::for_tests();
        config.password.hash_cost = 3;
        assert!(config.validate(Environment::Development).is_err());
        config.password.hash_cost = 32;
        assert!(config.validate(Environment::Development).is_err());
    }

    #[test]
    fn test_validate_keeps_password_floor() {
        let mut config = AuthConfig::for_tests();
        for min_length in [0, 1, 5] {
            config.password.min_length = min_length;
            assert!(matches!(
                config.validate(Environment::Development),
                Err(ConfigError::InvalidValue { ref key, .. }) if key == "PASSWORD_MIN_LENGTH"
            ));
        }
        config.password.min_length = 8;
        assert!(config.validate(Environment::Development).is_ok());
    }

    #[test]
    fn test_validate_bounds_issuer() {
        let mut config = AuthConfig::for_tests();
        config.token.issuer = "i".repeat(MAX_ISSUER_LENGTH);
        assert!(config.validate(Environment::Development).is_ok());

        for issuer in [String::new(), "i".repeat(MAX_ISSUER_LENGTH + 1)] {
            config.token.issuer = issuer;
            assert!(matches!(
                config.validate(Environment::Development),
                Err(ConfigError::InvalidValue { ref key, .. }) if key == "JWT_ISSUER"
            ));
        }
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        let config = AuthConfig {
            token: TokenConfig::new("short"),
            password: PasswordConfig::default(),
        };
        assert!(config.validate(Environment::Staging).is_ok());
        assert!(matches!(
            config.validate(Environment::Production),
            Err(ConfigError::Insecure { .. })
        ));
    }
}
