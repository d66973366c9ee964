//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing and policy validation (Argon2id)
//! - Cryptographic utilities (random bytes, Base64)
//! - Bearer-token header extraction
//! - Rate limiting infrastructure

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod rate_limit;
