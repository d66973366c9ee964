//! Application Configuration
//!
//! Configuration for the Auth application layer. The token signing secret
//! is held here and passed in explicitly at construction time; request
//! handling never reads ambient global state.

use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult};

/// Minimum length of the token signing secret in bytes
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for HMAC token signing (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// Access token lifetime (60 minutes)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Create config with the given signing secret
    ///
    /// Fails fast when the secret is shorter than [`MIN_TOKEN_SECRET_LEN`]
    /// bytes; the server must refuse to start rather than sign tokens with
    /// a weak key.
    pub fn new(token_secret: Vec<u8>) -> AppResult<Self> {
        if token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(AppError::internal(format!(
                "Token signing secret must be at least {} bytes (got {})",
                MIN_TOKEN_SECRET_LEN,
                token_secret.len()
            )));
        }

        Ok(Self {
            token_secret,
            token_ttl: Duration::from_secs(60 * 60),
            password_pepper: None,
        })
    }

    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(MIN_TOKEN_SECRET_LEN),
            token_ttl: Duration::from_secs(60 * 60),
            password_pepper: None,
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get token TTL in milliseconds
    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl.as_millis() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
