//! Route handlers
//!
//! - `users` - registration, login, identity, password change and logout
//! - `todos` - per-user todo CRUD
//! - `health` - liveness probe

pub mod health;
pub mod todos;
pub mod users;

use std::sync::Arc;

use todo_core::repositories::{TodoRepository, UserRepository};
use todo_core::services::{AuthService, TodoService};

/// Application state that holds shared services
pub struct AppState<U, T>
where
    U: UserRepository,
    T: TodoRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub todo_service: Arc<TodoService<T>>,
}

impl<U, T> AppState<U, T>
where
    U: UserRepository,
    T: TodoRepository,
{
    pub fn new(auth_service: Arc<AuthService<U>>, todo_service: Arc<TodoService<T>>) -> Self {
        Self {
            auth_service,
            todo_service,
        }
    }
}
