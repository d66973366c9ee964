//! Chat Error Types
//!
//! This module provides chat-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use projects::ProjectError;
use thiserror::Error;

use crate::domain::model::ModelError;

/// Chat-specific result type alias
pub type ChatResult<T> = Result<T, ChatError>;

/// Chat-specific error variants
#[derive(Debug, Error)]
pub enum ChatError {
    /// Project missing or owned by someone else
    #[error("Project not found")]
    ProjectNotFound,

    /// Local per-user throttle tripped
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider failure, surfaced after the retry policy gave up
    #[error("Model request failed: {0}")]
    Upstream(#[from] ModelError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::ProjectNotFound => StatusCode::NOT_FOUND,
            ChatError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ChatError::Upstream(ModelError::RateLimited) => StatusCode::SERVICE_UNAVAILABLE,
            ChatError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ChatError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::ProjectNotFound => ErrorKind::NotFound,
            ChatError::RateLimitExceeded => ErrorKind::TooManyRequests,
            ChatError::Upstream(ModelError::RateLimited) => ErrorKind::ServiceUnavailable,
            ChatError::Upstream(_) => ErrorKind::BadGateway,
            ChatError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ChatError::Upstream(e) => {
                tracing::error!(error = %e, "Model provider error");
            }
            ChatError::Internal(msg) => {
                tracing::error!(message = %msg, "Chat internal error");
            }
            ChatError::RateLimitExceeded => {
                tracing::warn!("Chat rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Chat error");
            }
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ProjectError> for ChatError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::ProjectNotFound => ChatError::ProjectNotFound,
            other => ChatError::Internal(other.to_string()),
        }
    }
}
