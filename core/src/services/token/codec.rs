//! HS256 token codec

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use todo_shared::config::TokenConfig;

use crate::domain::entities::{Claims, DecodedToken, TokenPurpose};
use crate::errors::{DomainError, TokenError};

/// Signs and verifies tokens with a secret injected at construction
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl TokenCodec {
    /// Creates a new codec
    ///
    /// # Arguments
    ///
    /// * `config` - Signing secret and issuer
    pub fn new(config: &TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Tokens carry no expiry; revocation happens by removal from the store.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["iss"]);
        validation.validate_exp = false;

        Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.issuer.clone(),
        }
    }

    /// Encodes a token for `user_id`
    ///
    /// Every call produces a distinct string, even for the same user and
    /// purpose within the same second.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token
    /// * `Err(DomainError::Token(TokenError::GenerationFailed))` - Signing failed
    pub fn encode(&self, user_id: Uuid, purpose: TokenPurpose) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, purpose, self.issuer.as_str());
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    /// Decodes and verifies a token
    ///
    /// Malformed input, a foreign signature, a wrong algorithm or issuer and
    /// an unparseable user id all fail with the same `TokenError::Rejected`.
    pub fn decode(&self, token: &str) -> Result<DecodedToken, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| DomainError::Token(TokenError::Rejected))?;

        let user_id = data
            .claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::Rejected))?;

        Ok(DecodedToken {
            user_id,
            purpose: data.claims.access,
        })
    }
}
