//! Main authentication service implementation

use std::sync::Arc;

use todo_shared::config::AuthConfig;
use todo_shared::utils::{mask_email, normalize_email};

use crate::domain::entities::{IssuedToken, TokenPurpose, User};
use crate::domain::value_objects::AuthSession;
use crate::errors::{
    AuthError, AuthenticationFailure, CredentialFailure, DomainError, DomainResult,
};
use crate::repositories::UserRepository;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenCodec;

use super::validation::{validate_email, validate_password, MAX_PASSWORD_BYTES};

/// Authentication service owning the user record lifecycle
pub struct AuthService<U: UserRepository> {
    /// User repository for persistence
    user_repository: Arc<U>,
    /// Credential hasher
    hasher: PasswordHasher,
    /// Token codec
    codec: TokenCodec,
    /// Minimum plaintext password length
    min_password_length: usize,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `config` - Token signing and password hashing configuration
    pub fn new(user_repository: Arc<U>, config: &AuthConfig) -> Self {
        Self {
            user_repository,
            hasher: PasswordHasher::from_config(&config.password),
            codec: TokenCodec::new(&config.token),
            min_password_length: config.password.min_length,
        }
    }

    /// The codec used to sign and verify tokens
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// The hasher used for credentials
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Register a new user and issue their first token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthSession)` - The stored user and the issued token
    /// * `Err(DomainError)` - Validation, duplicate email or store failure
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let user = self.create_user(email, password).await?;
        let token = self.issue_token(&user).await?;
        Ok(AuthSession::new(user, token))
    }

    /// Create and persist a user
    ///
    /// This method:
    /// 1. Validates and normalizes the email
    /// 2. Validates the password length
    /// 3. Hashes the pending credential
    /// 4. Persists the record; the store enforces email uniqueness
    pub async fn create_user(&self, email: &str, password: &str) -> DomainResult<User> {
        // Step 1 & 2: Validate input before touching the store
        let email = validate_email(email)?;
        validate_password(password, self.min_password_length)?;

        // Fast path for an obvious duplicate; the store remains the authority
        if self.user_repository.find_by_email(&email).await?.is_some() {
            tracing::info!(email = %mask_email(&email), "Registration rejected: email taken");
            return Err(AuthError::DuplicateIdentity.into());
        }

        // Step 3: Hash
        let mut user = User::new(email, password);
        self.persist_credential(&mut user).await?;

        // Step 4: Persist
        let masked = mask_email(&user.email);
        let user = self.user_repository.create(user).await.map_err(|e| {
            if matches!(e, DomainError::Auth(AuthError::DuplicateIdentity)) {
                tracing::info!(email = %masked, "Registration rejected: email taken");
            }
            e
        })?;

        tracing::info!(user_id = %user.id, email = %mask_email(&user.email), "User registered");
        Ok(user)
    }

    /// Issue a new auth token for `user`
    ///
    /// The token is appended to the user's collection in a single store
    /// operation and is returned only after that append succeeded.
    pub async fn issue_token(&self, user: &User) -> DomainResult<String> {
        let token = self.codec.encode(user.id, TokenPurpose::Auth)?;
        let entry = IssuedToken::new(TokenPurpose::Auth, token.clone());

        if !self.user_repository.push_token(user.id, &entry).await? {
            tracing::warn!(user_id = %user.id, "Token issued for a user that no longer exists");
            return Err(DomainError::not_found("User"));
        }

        tracing::debug!(user_id = %user.id, "Auth token issued");
        Ok(token)
    }

    /// Resolve a presented token to the user holding it
    ///
    /// The token must both verify cryptographically and still be present in
    /// the user's token collection. Verification runs first; a token that
    /// fails it never reaches the store.
    pub async fn resolve_by_token(&self, token: &str) -> DomainResult<User> {
        let decoded = self.codec.decode(token).map_err(|_| {
            tracing::debug!("Token failed verification");
            AuthError::AuthenticationRequired(AuthenticationFailure::InvalidToken)
        })?;

        self.user_repository
            .find_by_token(decoded.user_id, token, TokenPurpose::Auth)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %decoded.user_id, "Token verified but not live");
                AuthError::AuthenticationRequired(AuthenticationFailure::UnknownToken).into()
            })
    }

    /// Resolve an email/password pair to a user
    ///
    /// Unknown email and wrong password fail with the same error kind.
    pub async fn resolve_by_credentials(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                tracing::info!(email = %mask_email(&email), "Login failed");
                DomainError::from(AuthError::CredentialMismatch(CredentialFailure::UnknownEmail))
            })?;

        // the hash only covers the first MAX_PASSWORD_BYTES bytes
        if password.len() > MAX_PASSWORD_BYTES {
            tracing::info!(user_id = %user.id, "Login failed");
            return Err(AuthError::CredentialMismatch(CredentialFailure::WrongPassword).into());
        }

        let hash = user.password_hash().unwrap_or_default().to_string();
        if !self.hasher.verify_blocking(password.to_string(), hash).await {
            tracing::info!(user_id = %user.id, "Login failed");
            return Err(AuthError::CredentialMismatch(CredentialFailure::WrongPassword).into());
        }

        Ok(user)
    }

    /// Verify credentials and issue a fresh token
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let user = self.resolve_by_credentials(email, password).await?;
        let token = self.issue_token(&user).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthSession::new(user, token))
    }

    /// Remove exactly one token from `user`
    ///
    /// Idempotent: removing a token that is already gone succeeds.
    pub async fn remove_token(&self, user: &User, token: &str) -> DomainResult<()> {
        let removed = self.user_repository.pull_token(user.id, token).await?;
        tracing::debug!(user_id = %user.id, removed, "Auth token removed");
        Ok(())
    }

    /// Replace the user's password
    ///
    /// The new plaintext is validated and hashed exactly once. Issued tokens
    /// are left untouched.
    pub async fn change_password(&self, user: &User, new_password: &str) -> DomainResult<User> {
        validate_password(new_password, self.min_password_length)?;

        let mut user = user.clone();
        user.set_password(new_password);
        self.persist_credential(&mut user).await?;

        let hash = user.password_hash().ok_or_else(|| DomainError::Internal {
            message: "Credential still pending after hashing".to_string(),
        })?;
        self.user_repository.update_password(user.id, hash).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(user)
    }

    /// Hash the user's credential if, and only if, it is pending
    async fn persist_credential(&self, user: &mut User) -> DomainResult<()> {
        if let Some(plaintext) = user.pending_password() {
            let hash = self.hasher.hash_blocking(plaintext.to_string()).await?;
            user.mark_password_hashed(hash);
        }
        Ok(())
    }
}
