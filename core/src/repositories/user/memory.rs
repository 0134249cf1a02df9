//! In-memory implementation of UserRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{IssuedToken, TokenPurpose, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

#[derive(Default)]
struct UserTable {
    users: HashMap<Uuid, User>,
    // unique index: normalized email -> id
    by_email: HashMap<String, Uuid>,
}

/// Process-local user store
///
/// Every mutation happens under a single write lock, so token appends and
/// removals are atomic with respect to each other.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn find_by_token(
        &self,
        id: Uuid,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .users
            .get(&id)
            .filter(|user| user.has_token(token, purpose))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if user.password_hash().is_none() {
            return Err(DomainError::Internal {
                message: "Refusing to persist an unhashed credential".to_string(),
            });
        }

        let mut table = self.table.write().await;

        if table.by_email.contains_key(&user.email) {
            return Err(AuthError::DuplicateIdentity.into());
        }

        table.by_email.insert(user.email.clone(), user.id);
        table.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        let user = table
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User"))?;

        user.mark_password_hashed(password_hash.to_string());
        user.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn push_token(&self, id: Uuid, token: &IssuedToken) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        match table.users.get_mut(&id) {
            Some(user) => {
                user.add_token(token.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_token(&self, id: Uuid, token: &str) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table
            .users
            .get_mut(&id)
            .map(|user| user.remove_token(token))
            .unwrap_or(false))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        match table.users.remove(&id) {
            Some(user) => {
                table.by_email.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
