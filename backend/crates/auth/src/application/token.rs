//! Access Token Issuing and Verification
//!
//! Stateless signed bearer tokens. A token is two URL-safe base64
//! segments joined by a dot: a JSON payload carrying the subject email
//! and an absolute expiry timestamp, and an HMAC-SHA256 signature over
//! the encoded payload. Nothing is stored server-side; rotating the
//! secret invalidates every outstanding token.

use std::sync::Arc;

use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::email::Email;

type HmacSha256 = Hmac<Sha256>;

/// Token verification errors
///
/// Callers surface both variants uniformly as an authentication failure;
/// the split exists for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed payload, bad signature, or missing subject
    #[error("Token is malformed or has an invalid signature")]
    Invalid,

    /// Signature is valid but the encoded expiry has passed
    #[error("Token has expired")]
    Expired,
}

/// Signed token payload
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject identity (email)
    sub: String,
    /// Absolute expiry, unix epoch milliseconds
    exp: i64,
}

/// Issues and verifies access tokens under a server-held symmetric secret
pub struct AccessTokenIssuer {
    config: Arc<AuthConfig>,
}

impl AccessTokenIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a token for the subject, expiring `token_ttl` from now
    pub fn issue(&self, subject: &Email) -> String {
        let exp = Utc::now().timestamp_millis() + self.config.token_ttl_ms();
        self.issue_with_expiry(subject.as_str(), exp)
    }

    fn issue_with_expiry(&self, subject: &str, exp: i64) -> String {
        let claims = Claims {
            sub: subject.to_string(),
            exp,
        };
        let payload = serde_json::to_vec(&claims).expect("claims are always serializable");
        let payload_b64 = platform::crypto::to_base64url(&payload);

        let mut mac = HmacSha256::new_from_slice(&self.config.token_secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            payload_b64,
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Verify a token and extract its subject
    ///
    /// Signature integrity is checked before the payload is parsed, and
    /// the comparison is constant-time (`Mac::verify_slice`).
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let (payload_b64, signature_b64) = token.split_once('.').ok_or(TokenError::Invalid)?;

        let signature = platform::crypto::from_base64url(signature_b64)
            .map_err(|_| TokenError::Invalid)?;

        let mut mac = HmacSha256::new_from_slice(&self.config.token_secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::Invalid)?;

        let payload =
            platform::crypto::from_base64url(payload_b64).map_err(|_| TokenError::Invalid)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Invalid)?;

        if claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }

        if Utc::now().timestamp_millis() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }
}
