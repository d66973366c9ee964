//! Login Use Case
//!
//! Authenticates a user and issues an access token. Every failure path
//! collapses into `InvalidCredentials`: callers cannot tell whether the
//! email or the password was wrong.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::AccessTokenIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token
    pub access_token: String,
    /// Token type marker for the Authorization header
    pub token_type: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(email = %user.email, "Login attempt with invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let issuer = AccessTokenIssuer::new(self.config.clone());
        let access_token = issuer.issue(&user.email);

        tracing::info!(user_id = %user.user_id, email = %user.email, "User logged in");

        Ok(LoginOutput {
            access_token,
            token_type: "bearer".to_string(),
        })
    }
}
