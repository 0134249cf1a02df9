pub mod todo;
pub mod user;

pub use todo::{CreateTodoRequest, TodoListResponse, TodoResponse, UpdateTodoRequest};
pub use user::{ChangePasswordRequest, CredentialsRequest};
