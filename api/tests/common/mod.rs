//! Shared helpers for the HTTP integration tests
#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use actix_web::{dev::ServiceResponse, test, web};
use serde_json::{json, Value};
use todo_api::{middleware::AUTH_HEADER, AppState};
use todo_core::repositories::{InMemoryTodoRepository, InMemoryUserRepository};
use todo_core::services::{AuthService, TodoService};
use todo_shared::AuthConfig;

pub type TestState = AppState<InMemoryUserRepository, InMemoryTodoRepository>;

/// Fresh in-memory state with fast hashing
pub fn state() -> web::Data<TestState> {
    let users = Arc::new(InMemoryUserRepository::new());
    let todos = Arc::new(InMemoryTodoRepository::new());

    web::Data::new(AppState::new(
        Arc::new(AuthService::new(users, &AuthConfig::for_tests())),
        Arc::new(TodoService::new(todos)),
    ))
}

pub fn credentials(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

pub fn register_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/users")
        .set_json(credentials(email, password))
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/users/login")
        .set_json(credentials(email, password))
}

/// Authenticated request builder
pub fn authed(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header((AUTH_HEADER, token))
}

/// The `x-auth` header of a register/login response
pub fn token_of<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get(AUTH_HEADER)
        .expect("response carries x-auth")
        .to_str()
        .unwrap()
        .to_string()
}

/// Build the application over a fresh in-memory state
macro_rules! test_app {
    () => {
        test_app!(common::state())
    };
    ($state:expr) => {
        actix_web::test::init_service(todo_api::create_app(
            $state,
            &todo_shared::ServerConfig::default(),
        ))
        .await
    };
}

/// Register a user and return the issued token
macro_rules! register {
    ($app:expr, $email:expr, $password:expr) => {{
        let response = actix_web::test::call_service(
            &$app,
            common::register_request($email, $password).to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        common::token_of(&response)
    }};
}
