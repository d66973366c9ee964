//! Prompt Use Cases
//!
//! Prompts are reachable only through an owned project: creation and
//! listing resolve the parent project under the owner filter first, and
//! id-based update/delete join through the owning project in the store.

use std::sync::Arc;

use auth::Principal;
use kernel::id::{ProjectId, PromptId};

use crate::domain::entities::Prompt;
use crate::domain::repository::{ProjectRepository, PromptRepository};
use crate::error::{ProjectError, ProjectResult};

/// Prompt use cases
pub struct PromptUseCase<P, R>
where
    P: ProjectRepository,
    R: PromptRepository,
{
    project_repo: Arc<P>,
    prompt_repo: Arc<R>,
}

impl<P, R> PromptUseCase<P, R>
where
    P: ProjectRepository,
    R: PromptRepository,
{
    pub fn new(project_repo: Arc<P>, prompt_repo: Arc<R>) -> Self {
        Self {
            project_repo,
            prompt_repo,
        }
    }

    async fn require_owned_project(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> ProjectResult<()> {
        self.project_repo
            .find_owned(project_id, principal.user_id)
            .await?
            .map(|_| ())
            .ok_or(ProjectError::ProjectNotFound)
    }

    /// Create a prompt under an owned project
    pub async fn create(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        name: String,
        content: String,
    ) -> ProjectResult<Prompt> {
        self.require_owned_project(principal, project_id).await?;

        let prompt = self.prompt_repo.insert(project_id, &name, &content).await?;

        tracing::info!(
            prompt_id = %prompt.prompt_id,
            project_id = %project_id,
            "Prompt created"
        );

        Ok(prompt)
    }

    /// List the prompts of an owned project in creation order
    pub async fn list(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> ProjectResult<Vec<Prompt>> {
        self.require_owned_project(principal, project_id).await?;
        self.prompt_repo.list_for_project(project_id).await
    }

    /// Update a prompt by id; non-owned prompts look missing
    pub async fn update(
        &self,
        principal: &Principal,
        prompt_id: PromptId,
        name: String,
        content: String,
    ) -> ProjectResult<Prompt> {
        self.prompt_repo
            .update_owned(prompt_id, principal.user_id, &name, &content)
            .await?
            .ok_or(ProjectError::PromptNotFound)
    }

    /// Delete a prompt by id; non-owned prompts look missing
    pub async fn delete(&self, principal: &Principal, prompt_id: PromptId) -> ProjectResult<()> {
        let deleted = self
            .prompt_repo
            .delete_owned(prompt_id, principal.user_id)
            .await?;

        if !deleted {
            return Err(ProjectError::PromptNotFound);
        }

        tracing::info!(prompt_id = %prompt_id, "Prompt deleted");

        Ok(())
    }
}
