//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{
    Claims, Credential, DecodedToken, IssuedToken, Todo, TodoPatch, TokenPurpose, User,
    UserProfile,
};
pub use value_objects::AuthSession;
