//! Authenticated session value object.

use crate::domain::entities::User;

/// A user together with the token just issued to them
///
/// Returned by registration and login. The token is handed to the client
/// once, through the `x-auth` response header.
#[derive(Clone)]
pub struct AuthSession {
    /// The authenticated user
    pub user: User,

    /// Freshly issued token, already appended to the user's token collection
    pub token: String,
}

impl AuthSession {
    /// Creates a new session
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    /// * `token` - The token issued for this session
    pub fn new(user: User, token: String) -> Self {
        Self { user, token }
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}
