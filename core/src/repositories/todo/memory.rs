//! In-memory implementation of TodoRepository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Todo;
use crate::errors::DomainError;

use super::trait_::TodoRepository;

/// Process-local todo store, kept in insertion order
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, DomainError> {
        let mut todos = self.todos.write().await;
        todos.push(todo.clone());
        Ok(todo)
    }

    async fn find_by_creator(&self, creator_id: Uuid) -> Result<Vec<Todo>, DomainError> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .filter(|t| t.is_owned_by(creator_id))
            .cloned()
            .collect())
    }

    async fn find_owned(&self, id: Uuid, creator_id: Uuid) -> Result<Option<Todo>, DomainError> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .find(|t| t.id == id && t.is_owned_by(creator_id))
            .cloned())
    }

    async fn update(&self, todo: &Todo) -> Result<Option<Todo>, DomainError> {
        let mut todos = self.todos.write().await;
        let Some(stored) = todos
            .iter_mut()
            .find(|t| t.id == todo.id && t.is_owned_by(todo.creator_id))
        else {
            return Ok(None);
        };

        stored.text = todo.text.clone();
        stored.completed = todo.completed;
        stored.completed_at = todo.completed_at;
        Ok(Some(stored.clone()))
    }

    async fn delete_owned(&self, id: Uuid, creator_id: Uuid) -> Result<Option<Todo>, DomainError> {
        let mut todos = self.todos.write().await;
        let position = todos
            .iter()
            .position(|t| t.id == id && t.is_owned_by(creator_id));
        Ok(position.map(|index| todos.remove(index)))
    }
}
