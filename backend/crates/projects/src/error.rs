//! Projects Error Types
//!
//! This module provides resource-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Ownership failures
//! deliberately reuse the not-found variants so a non-owned resource
//! cannot be told apart from a missing one.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::repository::FileStoreError;

/// Projects-specific result type alias
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Projects-specific error variants
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Project missing or owned by someone else
    #[error("Project not found")]
    ProjectNotFound,

    /// Prompt missing or reachable only through someone else's project
    #[error("Prompt not found")]
    PromptNotFound,

    /// File record missing or reachable only through someone else's project
    #[error("File not found")]
    FileNotFound,

    /// Upload exceeds the configured size cap
    #[error("File too large (max {max_bytes} bytes)")]
    FileTooLarge { max_bytes: usize },

    /// Upload carried no file field
    #[error("Missing file field in upload")]
    MissingFile,

    /// External file store failure
    #[error("File store error: {0}")]
    Storage(#[from] FileStoreError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProjectError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProjectError::ProjectNotFound
            | ProjectError::PromptNotFound
            | ProjectError::FileNotFound => StatusCode::NOT_FOUND,
            ProjectError::FileTooLarge { .. } | ProjectError::MissingFile => {
                StatusCode::BAD_REQUEST
            }
            ProjectError::Storage(_) => StatusCode::BAD_GATEWAY,
            ProjectError::Database(_) | ProjectError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjectError::ProjectNotFound
            | ProjectError::PromptNotFound
            | ProjectError::FileNotFound => ErrorKind::NotFound,
            ProjectError::FileTooLarge { .. } | ProjectError::MissingFile => ErrorKind::BadRequest,
            ProjectError::Storage(_) => ErrorKind::BadGateway,
            ProjectError::Database(_) | ProjectError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ProjectError::Database(e) => {
                tracing::error!(error = %e, "Projects database error");
            }
            ProjectError::Internal(msg) => {
                tracing::error!(message = %msg, "Projects internal error");
            }
            ProjectError::Storage(e) => {
                tracing::error!(error = %e, "External file store error");
            }
            _ => {
                tracing::debug!(error = %self, "Projects error");
            }
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
