//! User account endpoints

use actix_web::{web, HttpResponse};
use todo_core::domain::AuthSession;
use todo_core::repositories::{TodoRepository, UserRepository};
use validator::Validate;

use crate::dto::{ChangePasswordRequest, CredentialsRequest};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, AUTH_HEADER};

use super::AppState;

fn session_response(session: AuthSession) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((AUTH_HEADER, session.token))
        .json(&session.user)
}

/// Handler for POST /users
///
/// Creates the account and signs it in. The token travels in the `x-auth`
/// response header; the body is the public user view.
///
/// ## Success (200 OK)
/// ```json
/// { "_id": "5b0c...", "email": "a@x.com" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: empty/invalid email or short password
/// - 409 Conflict: email already registered
pub async fn register<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    request.validate()?;

    let session = state
        .auth_service
        .register(&request.email, &request.password)
        .await?;

    Ok(session_response(session))
}

/// Handler for POST /users/login
///
/// Unknown email and wrong password produce the same 401 response.
pub async fn login<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    request.validate()?;

    let session = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(session_response(session))
}

/// Handler for GET /users/me
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(&auth.user)
}

/// Handler for PATCH /users/me/password
///
/// Issued tokens stay valid after the change.
pub async fn change_password<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    let user = state
        .auth_service
        .change_password(&auth.user, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(&user))
}

/// Handler for DELETE /users/me/token
///
/// Revokes only the token presented with this request; other sessions of
/// the same user keep working.
pub async fn logout<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    state
        .auth_service
        .remove_token(&auth.user, &auth.token)
        .await?;

    Ok(HttpResponse::Ok().finish())
}
