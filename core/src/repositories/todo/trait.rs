//! Todo repository trait.
//!
//! Every read and write except `create` is scoped by the owning user's id;
//! a todo belonging to someone else behaves exactly like a missing one.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Todo;
use crate::errors::DomainError;

/// Repository trait for Todo entity persistence operations
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist a new todo
    async fn create(&self, todo: Todo) -> Result<Todo, DomainError>;

    /// All todos owned by `creator_id`, oldest first
    async fn find_by_creator(&self, creator_id: Uuid) -> Result<Vec<Todo>, DomainError>;

    /// Find a todo by id, only if owned by `creator_id`
    async fn find_owned(&self, id: Uuid, creator_id: Uuid) -> Result<Option<Todo>, DomainError>;

    /// Overwrite text and completion fields of a todo owned by `todo.creator_id`
    ///
    /// # Returns
    /// * `Ok(Some(Todo))` - The stored todo after the update
    /// * `Ok(None)` - No matching todo for that owner
    async fn update(&self, todo: &Todo) -> Result<Option<Todo>, DomainError>;

    /// Delete a todo owned by `creator_id`, returning what was removed
    async fn delete_owned(&self, id: Uuid, creator_id: Uuid) -> Result<Option<Todo>, DomainError>;
}
