//! Infrastructure Layer
//!
//! Database implementations of the credential store.

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
