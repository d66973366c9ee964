//! Project Use Cases
//!
//! Create, list, and delete projects for the authenticated principal.

use std::sync::Arc;

use auth::Principal;
use kernel::id::ProjectId;

use crate::domain::entities::Project;
use crate::domain::repository::{FileRepository, FileStore, ProjectRepository};
use crate::error::{ProjectError, ProjectResult};

/// Project use cases
pub struct ProjectUseCase<P, F, S>
where
    P: ProjectRepository,
    F: FileRepository,
    S: FileStore,
{
    project_repo: Arc<P>,
    file_repo: Arc<F>,
    file_store: Arc<S>,
}

impl<P, F, S> ProjectUseCase<P, F, S>
where
    P: ProjectRepository,
    F: FileRepository,
    S: FileStore,
{
    pub fn new(project_repo: Arc<P>, file_repo: Arc<F>, file_store: Arc<S>) -> Self {
        Self {
            project_repo,
            file_repo,
            file_store,
        }
    }

    /// Create a project owned by the principal
    pub async fn create(&self, principal: &Principal, name: String) -> ProjectResult<Project> {
        let project = self.project_repo.insert(principal.user_id, &name).await?;

        tracing::info!(
            project_id = %project.project_id,
            email = %principal.email,
            "Project created"
        );

        Ok(project)
    }

    /// List the principal's projects
    pub async fn list(&self, principal: &Principal) -> ProjectResult<Vec<Project>> {
        let projects = self.project_repo.list_by_owner(principal.user_id).await?;

        tracing::debug!(
            email = %principal.email,
            count = projects.len(),
            "Projects listed"
        );

        Ok(projects)
    }

    /// Delete an owned project together with its prompts and file records
    ///
    /// Dependent rows go in the same transaction as the project row.
    /// External blobs are deleted afterwards, best effort: a provider
    /// failure is logged and does not undo the local delete.
    pub async fn delete(&self, principal: &Principal, project_id: ProjectId) -> ProjectResult<()> {
        // Capture file records first so their blobs can be cleaned up
        let files = match self
            .project_repo
            .find_owned(project_id, principal.user_id)
            .await?
        {
            Some(_) => self.file_repo.list_for_project(project_id).await?,
            None => return Err(ProjectError::ProjectNotFound),
        };

        let deleted = self
            .project_repo
            .delete_owned(project_id, principal.user_id)
            .await?;

        if !deleted {
            return Err(ProjectError::ProjectNotFound);
        }

        for file in &files {
            if let Err(e) = self.file_store.delete(&file.external_file_id).await {
                tracing::warn!(
                    file_id = %file.file_id,
                    external_file_id = %file.external_file_id,
                    error = %e,
                    "External file delete failed during project deletion"
                );
            }
        }

        tracing::info!(project_id = %project_id, email = %principal.email, "Project deleted");

        Ok(())
    }
}
