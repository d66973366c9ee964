//! Converse Use Case
//!
//! Assembles the conversation for an owned project and drives the model
//! call through the retry policy. The project lookup goes through the
//! same ownership filter as every other resource access: chatting
//! against someone else's project looks like a missing project.

use std::sync::Arc;

use auth::Principal;
use kernel::id::ProjectId;
use platform::rate_limit::RateLimitStore;
use projects::models::Project;
use projects::domain::repository::{ProjectRepository, PromptRepository};

use crate::application::config::ChatConfig;
use crate::domain::model::{ChatTurn, ModelClient};
use crate::error::{ChatError, ChatResult};

/// Fallback system context when the project has no prompts yet
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. \
Provide accurate, well-structured answers. Break complex topics into \
clear explanations, admit when you don't know something, and keep a \
professional but conversational tone.";

/// Converse use case
pub struct ConverseUseCase<R, M, L>
where
    R: ProjectRepository + PromptRepository,
    M: ModelClient,
    L: RateLimitStore,
{
    repo: Arc<R>,
    model: Arc<M>,
    limiter: Arc<L>,
    config: Arc<ChatConfig>,
}

impl<R, M, L> ConverseUseCase<R, M, L>
where
    R: ProjectRepository + PromptRepository,
    M: ModelClient,
    L: RateLimitStore,
{
    pub fn new(repo: Arc<R>, model: Arc<M>, limiter: Arc<L>, config: Arc<ChatConfig>) -> Self {
        Self {
            repo,
            model,
            limiter,
            config,
        }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        message: String,
    ) -> ChatResult<String> {
        // Per-user throttle
        let key = format!("chat:{}", principal.user_id);
        let limit = self
            .limiter
            .check_and_increment(&key, &self.config.rate_limit)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        if !limit.allowed {
            return Err(ChatError::RateLimitExceeded);
        }

        // Ownership gate
        let project: Project = ProjectRepository::find_owned(
            self.repo.as_ref(),
            project_id,
            principal.user_id,
        )
        .await?
        .ok_or(ChatError::ProjectNotFound)?;

        // Project prompts, in creation order, become the system context
        let prompts = self.repo.list_for_project(project_id).await?;
        let context = if prompts.is_empty() {
            DEFAULT_SYSTEM_PROMPT.to_string()
        } else {
            prompts
                .iter()
                .map(|p| p.content.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        };

        let turns = vec![ChatTurn::system(context), ChatTurn::user(message)];

        tracing::info!(
            project_id = %project.project_id,
            email = %principal.email,
            prompt_count = prompts.len(),
            "Chat request"
        );

        self.complete_with_retry(&turns).await
    }

    /// Run the model call under the retry policy
    ///
    /// Non-retryable classes (bad credentials, exhausted quota) surface
    /// immediately; everything else retries with exponential backoff
    /// until `max_attempts` is spent.
    async fn complete_with_retry(&self, turns: &[ChatTurn]) -> ChatResult<String> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let err = match self.model.complete(turns).await {
                Ok(reply) => {
                    tracing::debug!(attempt, "Model call succeeded");
                    return Ok(reply);
                }
                Err(err) => err,
            };

            if !err.is_retryable() || attempt >= self.config.max_attempts {
                tracing::warn!(error = %err, attempt, "Model call failed, giving up");
                return Err(ChatError::Upstream(err));
            }

            let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
            tracing::warn!(
                error = %err,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Model call failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
