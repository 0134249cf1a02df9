//! Domain entities representing core business objects.

pub mod todo;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use todo::{Todo, TodoPatch};
pub use token::{Claims, DecodedToken, IssuedToken, TokenPurpose};
pub use user::{Credential, User, UserProfile};
