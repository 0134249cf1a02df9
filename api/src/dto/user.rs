use serde::Deserialize;
use validator::Validate;

/// Body of `POST /users` and `POST /users/login`
///
/// Only the email length is checked here. Email shape and both password
/// bounds are enforced by the auth service, where the upper bound is
/// counted in bytes rather than chars.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub password: String,
}
