//! Credential hashing module

mod hasher;

pub use hasher::PasswordHasher;
