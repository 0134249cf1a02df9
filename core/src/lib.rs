//! # Todo Core
//!
//! Domain layer for the to-do API.
//! This crate contains domain entities, the authentication and todo services,
//! repository interfaces with their in-memory implementations, and the error
//! taxonomy that the HTTP layer maps onto responses.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AuthSession, Claims, Credential, DecodedToken, IssuedToken, Todo, TodoPatch, TokenPurpose,
    User, UserProfile,
};
pub use errors::{
    AuthError, AuthenticationFailure, CredentialFailure, DomainError, DomainResult, ErrorKind,
    TokenError, ValidationError,
};
pub use repositories::{
    InMemoryTodoRepository, InMemoryUserRepository, TodoRepository, UserRepository,
};
pub use services::{AuthService, PasswordHasher, TodoService, TokenCodec, TokenResolver};
