//! Infrastructure Layer
//!
//! Database implementations and test doubles.

pub mod memory;
pub mod postgres;

pub use memory::{MemoryFileStore, MemoryProjectsRepository};
pub use postgres::PgProjectsRepository;
