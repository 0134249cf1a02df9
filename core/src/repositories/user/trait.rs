//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and every method reports store failures through
//! `DomainError`. Token membership changes are single operations so that
//! concurrent issuances and logouts never overwrite one another.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{IssuedToken, TokenPurpose, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use todo_core::repositories::UserRepository;
/// use todo_core::domain::entities::{IssuedToken, TokenPurpose, User};
/// use todo_core::errors::DomainError;
///
/// struct PostgresUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PostgresUserRepository {
///     async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_email(&self, _: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn find_by_token(&self, _: Uuid, _: &str, _: TokenPurpose) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update_password(&self, _: Uuid, _: &str) -> Result<(), DomainError> { Ok(()) }
/// #   async fn push_token(&self, _: Uuid, _: &IssuedToken) -> Result<bool, DomainError> { Ok(true) }
/// #   async fn pull_token(&self, _: Uuid, _: &str) -> Result<bool, DomainError> { Ok(true) }
/// #   async fn delete(&self, _: Uuid) -> Result<bool, DomainError> { Ok(true) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email address
    ///
    /// # Arguments
    /// * `email` - Trimmed, lowercased email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id that still holds `token` with the given purpose
    ///
    /// Both conditions are evaluated by the store in a single lookup. A user
    /// that exists but no longer holds the token is reported as `Ok(None)`.
    ///
    /// # Arguments
    /// * `id` - User id decoded from the token
    /// * `token` - The exact token string presented by the client
    /// * `purpose` - Required purpose of the matching entry
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use todo_core::domain::entities::TokenPurpose;
    /// # use todo_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository, id: Uuid, token: &str) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_token(id, token, TokenPurpose::Auth).await? {
    ///     Some(user) => println!("Authenticated {}", user.id),
    ///     None => println!("Token not recognised"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_token(
        &self,
        id: Uuid,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// The user's credential must already be hashed; a pending plaintext is
    /// refused with `DomainError::Internal` and never written.
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::DuplicateIdentity))` - Email already taken
    /// * `Err(DomainError)` - Database or other error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the stored password hash, leaving issued tokens untouched
    ///
    /// # Returns
    /// * `Ok(())` - Hash replaced
    /// * `Err(DomainError::NotFound)` - No such user
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError>;

    /// Atomically append an issued token to the user's collection
    ///
    /// # Returns
    /// * `Ok(true)` - Token appended and durable
    /// * `Ok(false)` - No such user; nothing was written
    async fn push_token(&self, id: Uuid, token: &IssuedToken) -> Result<bool, DomainError>;

    /// Atomically remove every entry equal to `token`
    ///
    /// Idempotent: removing an absent token succeeds.
    ///
    /// # Returns
    /// * `Ok(true)` - At least one entry removed
    /// * `Ok(false)` - Nothing matched
    async fn pull_token(&self, id: Uuid, token: &str) -> Result<bool, DomainError>;

    /// Delete a user and, with it, every token it holds
    ///
    /// # Returns
    /// * `Ok(true)` - User deleted
    /// * `Ok(false)` - No such user
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
