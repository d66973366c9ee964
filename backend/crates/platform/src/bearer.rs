//! Bearer token extraction
//!
//! Common functions for pulling the access token out of the standard
//! `Authorization: Bearer <token>` request header.

use http::{HeaderMap, header};

/// Extract the bearer token from request headers
///
/// The scheme is matched case-insensitively per RFC 6750; surrounding
/// whitespace around the token is trimmed. Returns `None` when the header
/// is absent, not valid UTF-8, uses another scheme, or carries an empty
/// token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}
