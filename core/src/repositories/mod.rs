pub mod todo;
pub mod user;

pub use todo::{InMemoryTodoRepository, TodoRepository};
pub use user::{InMemoryUserRepository, UserRepository};
