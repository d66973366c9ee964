//! Chat Router

use axum::{Router, routing::post};
use std::sync::Arc;

use platform::rate_limit::RateLimitStore;
use projects::domain::repository::{ProjectRepository, PromptRepository};

use crate::application::config::ChatConfig;
use crate::domain::model::ModelClient;
use crate::presentation::handlers::{self, ChatAppState};

/// Create the chat router
///
/// Authentication is layered on by the caller; the handler expects a
/// resolved `Principal` in the request extensions.
pub fn chat_router<R, M, L>(
    repo: Arc<R>,
    model: Arc<M>,
    limiter: Arc<L>,
    config: Arc<ChatConfig>,
) -> Router
where
    R: ProjectRepository + PromptRepository + Send + Sync + 'static,
    M: ModelClient + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let state = ChatAppState {
        repo,
        model,
        limiter,
        config,
    };

    Router::new()
        .route("/", post(handlers::converse::<R, M, L>))
        .with_state(state)
}
