//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::AuthResult;

/// Credential store trait
///
/// The store is the only shared mutable state in the auth core. `insert`
/// must enforce email uniqueness atomically: when two concurrent
/// registrations race on the same email, exactly one succeeds and the
/// other observes [`crate::error::AuthError::EmailTaken`].
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user; fails with `EmailTaken` on a duplicate email
    async fn insert(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User>;

    /// Find user by email identity
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;
}
