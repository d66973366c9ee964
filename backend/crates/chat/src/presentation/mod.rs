//! Presentation Layer
//!
//! HTTP handler, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ChatAppState;
pub use router::chat_router;
