//! Ownership-scoped todo operations

use std::sync::Arc;
use uuid::Uuid;

use todo_shared::utils::not_blank;

use crate::domain::entities::{Todo, TodoPatch};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::TodoRepository;

/// Trim and require non-empty todo text
pub fn validate_text(text: &str) -> Result<String, ValidationError> {
    if !not_blank(text) {
        return Err(ValidationError::RequiredField {
            field: "text".to_string(),
        });
    }
    Ok(text.trim().to_string())
}

/// Todo service; every operation is scoped to the calling user
pub struct TodoService<T: TodoRepository> {
    todo_repository: Arc<T>,
}

impl<T: TodoRepository> TodoService<T> {
    pub fn new(todo_repository: Arc<T>) -> Self {
        Self { todo_repository }
    }

    /// Create a todo owned by `owner`
    pub async fn create(&self, owner: Uuid, text: &str) -> DomainResult<Todo> {
        let text = validate_text(text)?;
        let todo = self.todo_repository.create(Todo::new(owner, text)).await?;
        tracing::debug!(todo_id = %todo.id, owner = %owner, "Todo created");
        Ok(todo)
    }

    /// List the todos owned by `owner`
    pub async fn list(&self, owner: Uuid) -> DomainResult<Vec<Todo>> {
        self.todo_repository.find_by_creator(owner).await
    }

    /// Fetch one todo; someone else's todo is `NotFound`
    pub async fn get(&self, owner: Uuid, id: Uuid) -> DomainResult<Todo> {
        self.todo_repository
            .find_owned(id, owner)
            .await?
            .ok_or_else(|| DomainError::not_found("Todo"))
    }

    /// Delete one todo and return it
    pub async fn remove(&self, owner: Uuid, id: Uuid) -> DomainResult<Todo> {
        let todo = self
            .todo_repository
            .delete_owned(id, owner)
            .await?
            .ok_or_else(|| DomainError::not_found("Todo"))?;
        tracing::debug!(todo_id = %id, owner = %owner, "Todo deleted");
        Ok(todo)
    }

    /// Apply a patch to one todo
    ///
    /// See [`Todo::apply`] for the completion rules.
    pub async fn update(&self, owner: Uuid, id: Uuid, mut patch: TodoPatch) -> DomainResult<Todo> {
        if let Some(text) = patch.text.take() {
            patch.text = Some(validate_text(&text)?);
        }

        let mut todo = self.get(owner, id).await?;
        todo.apply(patch);

        self.todo_repository
            .update(&todo)
            .await?
            .ok_or_else(|| DomainError::not_found("Todo"))
    }
}
