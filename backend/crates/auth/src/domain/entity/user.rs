//! User Entity
//!
//! A registered user: the unique email identity plus the stored password
//! hash. The hash never leaves this crate; request handlers only ever see
//! the derived [`Principal`].

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned identifier
    pub user_id: UserId,
    /// Unique, case-sensitive email identity
    pub email: Email,
    /// Argon2id password hash (opaque, never exposed outward)
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// Authenticated principal attached to each request
///
/// Carries only what handlers need to scope queries by ownership.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: UserId,
    pub email: Email,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
        }
    }
}
