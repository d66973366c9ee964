//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes. Every
//! protected request passes through [`require_auth`], which resolves the
//! bearer token into a [`Principal`] and attaches it to the request
//! extensions before any handler logic runs. Handlers obtain the
//! principal with `Extension<Principal>`; there is no other path to one.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::ResolveIdentityUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::Principal;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware state
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthMiddlewareState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Middleware that requires a valid bearer token
///
/// Rejects with 401 before reaching any handler when the token is
/// missing, malformed, expired, forged, or names an unknown subject.
pub async fn require_auth<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Some(token) = extract_bearer_token(req.headers()) else {
        return Err(AuthError::Unauthenticated.into_response());
    };

    let use_case = ResolveIdentityUseCase::new(state.repo.clone(), state.config.clone());

    let principal: Principal = match use_case.execute(&token).await {
        Ok(principal) => principal,
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
