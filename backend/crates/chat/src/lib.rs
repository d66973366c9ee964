//! Chat Backend Module
//!
//! Conversation with the hosted language model, grounded in a project's
//! prompt templates.
//!
//! Clean Architecture structure:
//! - `domain/` - Conversation turns, model client trait, error classes
//! - `application/` - Conversation assembly and retry policy
//! - `infra/` - HTTP client for an OpenAI-compatible provider
//! - `presentation/` - HTTP handler
//!
//! ## Retry Model
//! - Credential and quota failures are terminal: never retried
//! - Everything else retries with exponential backoff up to a small
//!   fixed attempt count, then surfaces the last error

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ChatConfig;
pub use domain::model::{ChatTurn, ModelClient, ModelError, TurnRole};
pub use error::{ChatError, ChatResult};
pub use infra::http::HttpModelClient;
pub use presentation::router::chat_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::model::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
