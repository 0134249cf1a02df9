//! Application factory
//!
//! Builds the actix-web `App` from already-constructed services, so the
//! binary and the integration tests serve exactly the same routes.

use std::sync::Arc;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use todo_core::repositories::{TodoRepository, UserRepository};
use todo_core::services::TokenResolver;
use todo_shared::{error_codes, ErrorResponse, ServerConfig};

use crate::handlers::json_error_handler;
use crate::middleware::TokenAuth;
use crate::routes::{health, todos, users, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, T>(
    app_state: web::Data<AppState<U, T>>,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    let resolver: Arc<dyn TokenResolver> = app_state.auth_service.clone();
    let token_auth = TokenAuth::new(resolver);

    let json_config = web::JsonConfig::default()
        .limit(server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::register::<U, T>))
                .route("/login", web::post().to(users::login::<U, T>))
                .service(
                    web::scope("/me")
                        .wrap(token_auth.clone())
                        .route("", web::get().to(users::me))
                        .route("/password", web::patch().to(users::change_password::<U, T>))
                        .route("/token", web::delete().to(users::logout::<U, T>)),
                ),
        )
        .service(
            web::scope("/todos")
                .wrap(token_auth)
                .route("", web::post().to(todos::create_todo::<U, T>))
                .route("", web::get().to(todos::list_todos::<U, T>))
                .route("/{id}", web::get().to(todos::get_todo::<U, T>))
                .route("/{id}", web::delete().to(todos::delete_todo::<U, T>))
                .route("/{id}", web::patch().to(todos::update_todo::<U, T>)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
