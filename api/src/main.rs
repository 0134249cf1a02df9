use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use todo_api::{config, create_app, AppState};
use todo_core::repositories::{
    InMemoryTodoRepository, InMemoryUserRepository, TodoRepository, UserRepository,
};
use todo_core::services::{AuthService, TodoService};
use todo_infra::database::{DatabasePool, MySqlTodoRepository, MySqlUserRepository};
use todo_shared::{AppConfig, LogFormat, LoggingConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Invalid configuration")?;
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        backend = %config.database.backend,
        "Starting to-do API server"
    );
    if config.auth.token.is_using_default_secret() {
        warn!("JWT_SECRET is not set, tokens are signed with the development default");
    }

    match config.database.backend {
        StorageBackend::MySql => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("Failed to connect to MySQL")?;
            info!(pool = %pool.get_statistics(), "Database pool ready");

            let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
            let todos = Arc::new(MySqlTodoRepository::new(pool.get_pool().clone()));
            let result = serve(&config, users, todos).await;

            pool.close().await;
            result
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage, all data is lost on shutdown");
            let users = Arc::new(InMemoryUserRepository::new());
            let todos = Arc::new(InMemoryTodoRepository::new());
            serve(&config, users, todos).await
        }
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    let installed = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

async fn serve<U, T>(config: &AppConfig, users: Arc<U>, todos: Arc<T>) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    T: TodoRepository + 'static,
{
    let auth_service = Arc::new(AuthService::new(users, &config.auth));
    let todo_service = Arc::new(TodoService::new(todos));
    let state = web::Data::new(AppState::new(auth_service, todo_service));

    let server_config = config.server.clone();
    let bind_address = server_config.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), &server_config).wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
