//! Token codec module
//!
//! Encodes a `(user id, purpose)` pair into a signed HS256 JWT and decodes it
//! back. The codec is stateless: whether a token is still live is decided by
//! the user store, not here.

mod codec;


pub use codec::TokenCodec;
