//! Todo service module

mod service;

pub use service::{validate_text, TodoService};
