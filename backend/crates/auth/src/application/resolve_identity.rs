//! Resolve Identity Use Case
//!
//! The single chokepoint every protected operation passes through: turns
//! a raw bearer token into an authenticated [`Principal`] or fails with
//! `Unauthenticated`. A forged token and a token whose subject no longer
//! exists are indistinguishable to the caller.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::AccessTokenIssuer;
use crate::domain::entity::user::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Resolve identity use case
pub struct ResolveIdentityUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ResolveIdentityUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, raw_token: &str) -> AuthResult<Principal> {
        let issuer = AccessTokenIssuer::new(self.config.clone());

        let subject = issuer.verify(raw_token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::Unauthenticated
        })?;

        // The subject was validated at registration time; a token whose
        // subject no longer parses is treated like any other bad token.
        let email = Email::new(subject).map_err(|_| AuthError::Unauthenticated)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(Principal::from(&user))
    }
}
