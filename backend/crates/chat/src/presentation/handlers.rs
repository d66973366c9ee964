//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, State};
use std::sync::Arc;

use auth::Principal;
use kernel::id::ProjectId;
use platform::rate_limit::RateLimitStore;
use projects::domain::repository::{ProjectRepository, PromptRepository};

use crate::application::ConverseUseCase;
use crate::application::config::ChatConfig;
use crate::domain::model::ModelClient;
use crate::error::ChatResult;
use crate::presentation::dto::{ChatRequest, ChatResponse};

/// Shared state for chat handlers
pub struct ChatAppState<R, M, L>
where
    R: ProjectRepository + PromptRepository + Send + Sync + 'static,
    M: ModelClient + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub model: Arc<M>,
    pub limiter: Arc<L>,
    pub config: Arc<ChatConfig>,
}

impl<R, M, L> Clone for ChatAppState<R, M, L>
where
    R: ProjectRepository + PromptRepository + Send + Sync + 'static,
    M: ModelClient + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            model: self.model.clone(),
            limiter: self.limiter.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /api/chat
pub async fn converse<R, M, L>(
    State(state): State<ChatAppState<R, M, L>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<ChatRequest>,
) -> ChatResult<Json<ChatResponse>>
where
    R: ProjectRepository + PromptRepository + Send + Sync + 'static,
    M: ModelClient + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let use_case = ConverseUseCase::new(
        state.repo.clone(),
        state.model.clone(),
        state.limiter.clone(),
        state.config.clone(),
    );

    let reply = use_case
        .execute(&principal, ProjectId::from_i64(req.project_id), req.message)
        .await?;

    Ok(Json(ChatResponse { reply }))
}
