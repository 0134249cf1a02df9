pub mod auth;

pub use auth::{AuthContext, TokenAuth, AUTH_HEADER};
