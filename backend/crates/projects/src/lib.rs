//! Projects Backend Module
//!
//! Ownership-scoped workspace resources: projects, their prompt templates,
//! and uploaded-file records.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, repository traits, external file store trait
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Access Model
//! - Every read/update/delete filters by the owner in the same lookup
//!   that fetches the row; prompts and file records join through their
//!   parent project
//! - A resource owned by someone else is indistinguishable from one that
//!   does not exist (404, never 403)
//! - Uploaded bytes live in an external store; only the metadata row is
//!   kept here

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ProjectsConfig;
pub use domain::repository::{FileStore, FileStoreError};
pub use error::{ProjectError, ProjectResult};
pub use infra::postgres::PgProjectsRepository;
pub use presentation::router::projects_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::{MemoryFileStore, MemoryProjectsRepository};
    pub use crate::infra::postgres::PgProjectsRepository as ProjectsStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
