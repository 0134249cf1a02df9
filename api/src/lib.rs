//! HTTP layer of the to-do API
//!
//! Exposed as a library so the integration tests in `tests/` can build the
//! same application the binary serves.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
