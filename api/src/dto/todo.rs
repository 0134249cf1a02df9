use serde::{Deserialize, Serialize};
use todo_core::domain::entities::{Todo, TodoPatch};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub text: String,
}

/// Body of `PATCH /todos/{id}`; unknown fields are ignored
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(length(max = 1024))]
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        TodoPatch {
            text: request.text,
            completed: request.completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub todo: Todo,
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}
