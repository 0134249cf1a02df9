//! Todo endpoints. All of them run behind the token middleware and only
//! ever see todos created by the authenticated user.

use actix_web::{web, HttpResponse};
use todo_core::errors::DomainError;
use todo_core::repositories::{TodoRepository, UserRepository};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CreateTodoRequest, TodoListResponse, TodoResponse, UpdateTodoRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

use super::AppState;

/// A malformed id cannot name an existing todo, so it is a 404 like any other miss
fn parse_todo_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::not_found("Todo").into())
}

/// Handler for POST /todos
pub async fn create_todo<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    request: web::Json<CreateTodoRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    request.validate()?;

    let todo = state.todo_service.create(auth.user.id, &request.text).await?;
    Ok(HttpResponse::Ok().json(&todo))
}

/// Handler for GET /todos
pub async fn list_todos<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    let todos = state.todo_service.list(auth.user.id).await?;
    Ok(HttpResponse::Ok().json(TodoListResponse { todos }))
}

/// Handler for GET /todos/{id}
pub async fn get_todo<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    let id = parse_todo_id(&path)?;
    let todo = state.todo_service.get(auth.user.id, id).await?;
    Ok(HttpResponse::Ok().json(TodoResponse { todo }))
}

/// Handler for DELETE /todos/{id}
pub async fn delete_todo<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    let id = parse_todo_id(&path)?;
    let todo = state.todo_service.remove(auth.user.id, id).await?;
    Ok(HttpResponse::Ok().json(TodoResponse { todo }))
}

/// Handler for PATCH /todos/{id}
///
/// `completed: true` stamps `completedAt`; any other body resets both
/// `completed` and `completedAt`.
pub async fn update_todo<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<UpdateTodoRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    let id = parse_todo_id(&path)?;
    request.validate()?;

    let todo = state
        .todo_service
        .update(auth.user.id, id, request.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(TodoResponse { todo }))
}
