//! In-Memory Repository Implementation
//!
//! Single-process credential store used by tests and local development.
//! The whole map sits behind one mutex, so the contains-then-insert pair
//! is atomic and a duplicate-email race has exactly one winner, matching
//! the unique-index semantics of the postgres store.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: HashMap<String, User>,
}

/// In-memory credential store
#[derive(Default)]
pub struct MemoryUserRepository {
    inner: Mutex<Inner>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn insert(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if inner.users.contains_key(email.as_str()) {
            return Err(AuthError::EmailTaken);
        }

        inner.next_id += 1;
        let user = User {
            user_id: UserId::from_i64(inner.next_id),
            email: email.clone(),
            password_hash: password_hash.clone(),
            created_at: Utc::now(),
        };

        inner.users.insert(email.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.users.get(email.as_str()).cloned())
    }
}
