//! Token authentication middleware for protected endpoints.
//!
//! Reads the token from the `x-auth` header, resolves it through a
//! [`TokenResolver`] (signature check plus live membership in the user's
//! token collection) and injects an [`AuthContext`] into the request.
//! Handlers take the context as an extractor.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use todo_core::{
    domain::entities::User,
    errors::{AuthError, AuthenticationFailure, DomainError},
    services::TokenResolver,
};

use crate::handlers::ApiError;

/// Header carrying the session token, both on requests and on the
/// register/login responses
pub const AUTH_HEADER: &str = "x-auth";

/// Identity attached to an authenticated request
#[derive(Clone)]
pub struct AuthContext {
    /// The resolved user
    pub user: User,
    /// The exact token presented with this request
    pub token: String,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

fn authentication_required(failure: AuthenticationFailure) -> ApiError {
    ApiError::from(DomainError::from(AuthError::AuthenticationRequired(failure)))
}

/// Token authentication middleware factory
#[derive(Clone)]
pub struct TokenAuth {
    resolver: Arc<dyn TokenResolver>,
}

impl TokenAuth {
    pub fn new(resolver: Arc<dyn TokenResolver>) -> Self {
        Self { resolver }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthMiddleware {
            service: Rc::new(service),
            resolver: Arc::clone(&self.resolver),
        }))
    }
}

/// Token authentication middleware service
pub struct TokenAuthMiddleware<S> {
    service: Rc<S>,
    resolver: Arc<dyn TokenResolver>,
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let resolver = Arc::clone(&self.resolver);

        Box::pin(async move {
            let Some(token) = extract_token(req.headers()) else {
                tracing::debug!(path = %req.path(), "Request without auth token");
                let error = authentication_required(AuthenticationFailure::MissingToken);
                return Ok(req.error_response(error).map_into_right_body());
            };

            let user = match resolver.resolve(&token).await {
                Ok(user) => user,
                Err(error) => {
                    tracing::debug!(path = %req.path(), kind = ?error.kind(), "Token did not resolve");
                    return Ok(req.error_response(ApiError::from(error)).map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthContext { user, token });

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts the raw token from the `x-auth` header
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTH_HEADER)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for handlers behind [`TokenAuth`]
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| authentication_required(AuthenticationFailure::MissingToken).into());

        ready(result)
    }
}
