//! Token resolution seam used by the HTTP middleware

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::errors::DomainError;
use crate::repositories::UserRepository;

use super::service::AuthService;

/// Resolves a presented bearer token to the user that holds it
///
/// Object-safe so that middleware can hold it as `Arc<dyn TokenResolver>`
/// without knowing the concrete repository type.
#[async_trait]
pub trait TokenResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<User, DomainError>;
}

#[async_trait]
impl<U: UserRepository + 'static> TokenResolver for AuthService<U> {
    async fn resolve(&self, token: &str) -> Result<User, DomainError> {
        self.resolve_by_token(token).await
    }
}
